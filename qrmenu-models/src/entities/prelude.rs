pub use super::client::{
    ActiveModel as ClientActiveModel, Column as ClientColumn, Entity as Client,
    Model as ClientModel,
};
