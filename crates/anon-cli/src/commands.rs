pub mod allocate;
pub mod corpus;
pub mod thread;
