pub(crate) mod event;
pub(crate) mod gesture;
