// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

use capstone_db::{DatabaseConfig, MemoryGateway};
use std::io::Write;
use tempfile::NamedTempFile;
use tracing_subscriber::EnvFilter;

/// Route tracing output through the test harness. Safe to call from every test.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Write `yaml` to a temporary fixture file. The file lives as long as the returned handle.
pub fn fixture_file(yaml: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("create fixture file");
    file.write_all(yaml.as_bytes()).expect("write fixture file");
    file
}

/// A gateway loaded from `yaml`, along with the fixture file backing it.
pub fn gateway_from(yaml: &str) -> (MemoryGateway, NamedTempFile) {
    let file = fixture_file(yaml);
    let config = DatabaseConfig {
        fixtures: Some(file.path().to_path_buf()),
        ..Default::default()
    };
    let gateway = MemoryGateway::open(config).expect("open gateway");
    (gateway, file)
}
