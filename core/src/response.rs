// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

/// The generic response used to return a list of SCIM resources
#[derive(Deserialize, Serialize, Debug)]
pub struct ListResponse<T> {
    #[serde(default)]
    pub schemas: Vec<String>,

    #[serde(rename = "totalResults")]
    pub total_results: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default, rename = "startIndex")]
    pub start_index: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default, rename = "itemsPerPage")]
    pub items_per_page: Option<usize>,

    // The account API leaves this out entirely when nothing matched.
    #[serde(default = "Vec::new", rename = "Resources")]
    pub resources: Vec<T>,
}

impl<T> ListResponse<T> {
    /// A single page holding every resource.
    pub fn from_resources(resources: Vec<T>) -> Self {
        Self {
            schemas: vec![LISTRESPONSE_URN.to_string()],
            total_results: resources.len(),
            start_index: Some(1),
            items_per_page: Some(resources.len()),
            resources,
        }
    }
}
