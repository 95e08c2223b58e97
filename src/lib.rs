// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! mission-control is a client facade for the Launchpad Mission Control
//! service. It asks Mission Control whether an OpenShift project, a GitHub
//! repository, or a stored OpenShift or GitHub token already exists, so that
//! user input can be validated before any resources are actually created.
//! It can also list the OpenShift clusters and projects available to a user.
//!
//! Validation operations never fail: they always return a human-readable
//! message, which is [`OK`](validation::VALIDATION_MESSAGE_OK) when the
//! input is acceptable. Listing operations never fail either: they return
//! an empty list if Mission Control cannot be reached.
//!
//! # Examples
//!
//! (In all examples, replace `$TOKEN` with a real authorization header
//! value, such as `Bearer abc123`.)
//!
//! Check whether an OpenShift project name is still available:
//!
//! ```bash
//! mission-control --auth "$TOKEN" validate project my-project
//! ```
//!
//! Check the same name on a specific cluster:
//!
//! ```bash
//! mission-control --auth "$TOKEN" validate project my-project --cluster starter-us-east-1
//! ```
//!
//! Check whether a GitHub repository name is still available:
//!
//! ```bash
//! mission-control --auth "$TOKEN" validate repository my-repository
//! ```
//!
//! Check that the user has stored a GitHub token:
//!
//! ```bash
//! mission-control --auth "$TOKEN" validate github-token
//! ```
//!
//! List the user's OpenShift projects:
//!
//! ```bash
//! mission-control --auth "$TOKEN" projects
//! ```
//!
//! # Configuration
//!
//! Mission Control is contacted at `http://launchpad-missioncontrol:8080` by
//! default. The host and port can be changed with the
//! `$LAUNCHPAD_MISSIONCONTROL_SERVICE_HOST` and
//! `$LAUNCHPAD_MISSIONCONTROL_SERVICE_PORT` environment variables, or with
//! explicit overrides; see [`conf`] for details.
//!
//! # Library usage
//!
//! ```no_run
//! use mission_control::MissionControl;
//!
//! # async fn example() -> Result<(), mission_control::Error> {
//! let mission_control = MissionControl::from_env()?;
//! let message = mission_control
//!     .validate_openshift_project_exists("Bearer abc123", "my-project", None)
//!     .await;
//! println!("{message}");
//! # Ok(())
//! # }
//! ```
//!
//! # License
//!
//! mission-control is licensed under the terms of the [Apache License 2.0].
//! Please see the LICENSE file accompanying this source code or visit the
//! previous link for more information on licensing.
//!
//! [Apache License 2.0]: https://www.apache.org/licenses/LICENSE-2.0

pub mod cli;
pub mod client;
pub mod conf;
pub mod endpoint;
pub mod http;
pub mod service;
pub mod validation;

pub use client::{Error, MissionControl};

#[cfg(test)]
mod test_utils;
