//! Response shapes of the Artemis endpoints.
//!
//! Every response shares the `{code, msg, data}` envelope. Unknown fields are
//! ignored; camera shapes keep vendor specific fields in `extra_field`.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::constants::SUCCESS_CODES;

/// The embedded status every envelope carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Status {
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub msg: String,
}

impl Status {
    /// Returns true if `code` is one of the success sentinels.
    pub fn is_success(&self) -> bool {
        SUCCESS_CODES.contains(&self.code.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub page: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub size: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub total: i64,
}

/// A node of the control unit (organization) tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ControlUnitInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub create_time: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub update_time: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub index_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub parent_index_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub parent_tree: String,
    #[serde(deserialize_with = "null_as_default")]
    pub unit_level: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub unit_type: i64,
}

/// Result of [`Client::control_units`](crate::Client::control_units).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ControlUnits {
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub msg: String,
    #[serde(deserialize_with = "null_as_default")]
    pub data: Vec<ControlUnitInfo>,
    #[serde(deserialize_with = "null_as_default")]
    pub page: PageInfo,
}

/// Result of [`Client::children_control_units`](crate::Client::children_control_units).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChildrenControlUnits {
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub msg: String,
    #[serde(deserialize_with = "null_as_default")]
    pub data: Vec<ControlUnitInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SecurityInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub app_secret: String,
    #[serde(deserialize_with = "null_as_default")]
    pub time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub time_secret: String,
}

/// Result of [`Client::security_info`](crate::Client::security_info).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SecurityParam {
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub msg: String,
    #[serde(deserialize_with = "null_as_default")]
    pub data: SecurityInfo,
}

/// Camera entry as returned by the paged list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CameraInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub camera_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub index_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub parent_index_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub camera_type: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub pixel: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub latitude: String,
    #[serde(deserialize_with = "null_as_default")]
    pub longitude: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_online: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub control_unit_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub decode_tag: String,
    #[serde(deserialize_with = "null_as_default")]
    pub create_time: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub update_time: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub extra_field: HashMap<String, Value>,
}

/// Result of [`Client::cameras`](crate::Client::cameras).
///
/// The gateway reports `total` as a string here.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Cameras {
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub msg: String,
    #[serde(deserialize_with = "null_as_default")]
    pub data: Vec<CameraInfo>,
    #[serde(deserialize_with = "null_as_default")]
    pub total: String,
}

/// Result of [`Client::children_cameras`](crate::Client::children_cameras).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChildrenCameras {
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub msg: String,
    #[serde(deserialize_with = "null_as_default")]
    pub data: Vec<CameraInfo>,
    #[serde(deserialize_with = "null_as_default")]
    pub page: PageInfo,
}

/// Camera entry as returned by the detail endpoint.
///
/// Field types differ from [`CameraInfo`]: the gateway sends `cameraType`,
/// `pixel` and `isOnline` as strings and the coordinates as numbers.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CameraDetail {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(rename = "matrix_code")]
    #[serde(deserialize_with = "null_as_default")]
    pub matrix_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub index_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub app_code: String,
    #[serde(rename = "originalIndexcode")]
    #[serde(deserialize_with = "null_as_default")]
    pub original_index_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub chan_num: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub device_idx: String,
    #[serde(deserialize_with = "null_as_default")]
    pub parent_index_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub camera_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pixel: String,
    #[serde(deserialize_with = "null_as_default")]
    pub latitude: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub longitude: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub is_online: String,
    #[serde(deserialize_with = "null_as_default")]
    pub decode_tag: String,
    #[serde(deserialize_with = "null_as_default")]
    pub create_time: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub update_time: u64,
    #[serde(rename = "treeNodeIndexcode")]
    #[serde(deserialize_with = "null_as_default")]
    pub tree_node_index_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tree_node_path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub type_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub extra_field: HashMap<String, Value>,
}

/// Result of [`Client::camera_detail`](crate::Client::camera_detail).
///
/// `data` is a single object on some gateway versions and a list on others,
/// both decode into a list.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraDetails {
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub msg: String,
    #[serde(deserialize_with = "one_or_many")]
    pub data: Vec<CameraDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PreviewUrl {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

/// Result of [`Client::preview_url`](crate::Client::preview_url).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Preview {
    #[serde(deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub msg: String,
    #[serde(deserialize_with = "null_as_default")]
    pub data: PreviewUrl,
}

/// Decode `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        Many(Vec<T>),
        One(T),
    }

    Ok(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::Many(v)) => v,
        Some(OneOrMany::One(v)) => vec![v],
    })
}
