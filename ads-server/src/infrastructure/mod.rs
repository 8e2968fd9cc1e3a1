pub(crate) mod logging;
pub(crate) mod settings;
pub(crate) mod shutdown;
