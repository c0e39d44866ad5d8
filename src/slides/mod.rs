pub(crate) mod brightness;
pub(crate) mod preload;
pub(crate) mod sampler;
pub(crate) mod session;
