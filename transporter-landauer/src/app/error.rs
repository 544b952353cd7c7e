// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Error
//! The error type for the binary

use crate::error::TransportError;
use miette::Diagnostic;

#[derive(thiserror::Error, Debug, Diagnostic)]
pub(crate) enum AppError {
    #[error(transparent)]
    #[diagnostic(code(transporter::io_error))]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    #[diagnostic(
        code(transporter::config_error),
        help("values are read from .config/default.toml, .config/$RUN_MODE.toml, --config and TRANSPORTER_* variables")
    )]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    #[diagnostic(code(transporter::serialization_error))]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Transport(#[from] TransportError),
}
