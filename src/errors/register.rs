use crate::key::ServiceKey;

#[derive(thiserror::Error, Debug)]
pub enum RegisterErrorKind {
    #[error("Service {key} is already registered. Use a distinct key to register several implementations")]
    Duplicate { key: ServiceKey },
}
