pub use common::{self, math::*};

pub use toybox_host as host;
pub use toybox_input as input;
pub use toybox_cfg as cfg;

pub use host::prelude::*;
pub use input::prelude::*;
pub use cfg::prelude::*;

pub use input::triggers;


pub use anyhow;

pub use tracing;
#[doc(hidden)]
pub use tracing::instrument;

pub use std::error::Error;
