// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;
use slog::Logger;

use validate::Constraints;
use validate::integer_value;
use validate::string_value;

mod accounts;
mod client;
mod group;
mod patch;
mod response;
mod scim;
mod urn;
mod user;
pub mod validate;
mod workspaces;

pub use accounts::*;
pub use client::*;
pub use group::*;
pub use patch::*;
pub use response::*;
pub use scim::*;
pub use urn::*;
pub use user::*;
pub use validate::ValidationError;
pub use workspaces::*;

/// Most identifiers and names handed to the account API must be present and
/// non-empty.
fn required_text(name: &str, value: &str) -> Result<String, ValidationError> {
    Ok(string_value(name, value, &Constraints::required().min_length(1))?
        .unwrap_or_default())
}
