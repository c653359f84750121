// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Endpoint table of the Artemis open platform.

/// Env name of the gateway base URL, e.g. `https://10.0.0.1:443`.
pub const ARTEMIS_ENDPOINT: &str = "ARTEMIS_ENDPOINT";

/// Paged list of control units. Query: `size`, `start`.
pub const FIND_CONTROL_UNIT_PAGE: &str =
    "/artemis/api/common/v1/remoteControlUnitRestService/findControlUnitPage";
/// Children of a control unit. Query: `unitCode`.
pub const FIND_CONTROL_UNIT_BY_UNIT_CODE: &str =
    "/artemis/api/common/v1/remoteControlUnitRestService/findControlUnitByUnitCode";
/// Security parameters of an application. The app key is the last path segment.
pub const SECURITY_PARAM: &str = "/artemis/api/artemis/v1/agreementService/securityParam/appKey";
/// Paged list of cameras. Query: `size`, `start`.
pub const FIND_CAMERA_INFO_PAGE: &str =
    "/artemis/api/common/v1/remoteCameraInfoRestService/findCameraInfoPage";
/// Paged list of cameras under a tree node. Query: `size`, `start`, `treeNode`.
pub const FIND_CAMERA_INFO_PAGE_BY_TREE_NODE: &str =
    "/artemis/api/common/v1/remoteControlUnitRestService/findCameraInfoPageByTreeNode";
/// Camera detail. Query: `indexCode`.
///
/// Older gateways expose this as `.../findCameraInfoByIndexCode/{indexCode}`;
/// only the query form is used here.
pub const FIND_CAMERA_INFO_BY_INDEX_CODE: &str =
    "/artemis/api/common/v1/remoteCameraInfoRestService/findCameraInfoByIndexCode";
/// Preview stream URL. Query: `cameraIndexCode`, `subStream`, `protocol`.
pub const PREVIEW: &str = "/artemis/api/video/v1/preview";

/// Embedded status codes that mean success.
pub const SUCCESS_CODES: [&str; 2] = ["200", "0"];
