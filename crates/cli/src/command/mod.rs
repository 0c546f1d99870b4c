mod generate;
mod inspect;
mod setup;

pub(crate) use generate::{create, generate, refresh, replace};
pub(crate) use inspect::{preview, status, versions, window};
pub(crate) use setup::setup;
