/*
Copyright 2024 San Francisco Compute Company

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! End-to-end checks of the fetch -> extract -> render pipeline

use assert_fs::prelude::*;
use predicates::prelude::*;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use xclarity_inventory::{
    create_service, write_records, ConfigurationProvider, FetchError, InventoryError,
    OutputFormat, TomlConfigurationProvider,
};

const NODES_DOCUMENT: &str = r#"{
  "nodeList": [
    {
      "name": "SR650-Rack1-U10",
      "serialNumber": "J30087XY",
      "model": "7X06CTO1WW",
      "processors": [
        {"displayName": "Intel(R) Xeon(R) Gold 6248 CPU @ 2.50GHz", "speed": 2.5, "cores": 20},
        {"displayName": "Intel(R) Xeon(R) Gold 6248 CPU @ 2.50GHz", "speed": 2.5, "cores": 20}
      ],
      "memoryModules": [{"capacity": 32}, {"capacity": 32}, {"capacity": 32}, {"capacity": 32}]
    },
    {
      "name": "Empty-Bay-3",
      "serialNumber": "",
      "model": "",
      "processors": [],
      "memoryModules": []
    },
    {
      "name": "SD530-Node2",
      "serialNumber": "J1002ABC",
      "model": "7X21CTO1WW",
      "processors": [
        {"displayName": "Intel(R) Xeon(R) Silver 4214 CPU @ 2.20GHz", "speed": 2.2, "cores": 12}
      ],
      "memoryModules": [{"capacity": 16}]
    }
  ]
}"#;

async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        String::from_utf8_lossy(&request).to_string()
    });

    (format!("http://{addr}"), handle)
}

fn write_config(temp: &assert_fs::TempDir, base_url: &str) -> TomlConfigurationProvider {
    let file = temp.child("xclarity_inventory.toml");
    file.write_str(&format!(
        "[api]\nbase_url = \"{base_url}/\"\nusername = \"reporter\"\npassword = \"secret\"\ntimeout_secs = 5\ncertfile = \"{}\"\n",
        temp.child("missing.pem").path().display()
    ))
    .unwrap();
    TomlConfigurationProvider::new(file.path())
}

#[tokio::test]
async fn test_pipeline_renders_table() {
    let (base_url, server) = serve_once("200 OK", NODES_DOCUMENT).await;
    let temp = assert_fs::TempDir::new().unwrap();
    let config = write_config(&temp, &base_url).appliance_config().unwrap();

    let service = create_service(config).unwrap();
    let extraction = service.collect_nodes().await.unwrap();

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /nodes HTTP/1.1"));

    assert_eq!(extraction.records.len(), 2);
    assert!(extraction.diagnostics.is_empty());

    let first = &extraction.records[0];
    assert_eq!(first.name, "sr650-rack1-u10");
    assert_eq!(first.cpu_code, "6248");
    assert_eq!(first.sockets, 2);
    assert_eq!(first.cores, 20);
    assert_eq!(first.total_memory, 128);

    let second = &extraction.records[1];
    assert_eq!(second.name, "sd530-node2");
    assert_eq!(second.cpu_code, "Unknown");

    let mut out = Vec::new();
    write_records(&mut out, &extraction.records, OutputFormat::Table).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(predicate::str::contains("6248     2.50 2 20  128").eval(&text));
    assert!(predicate::str::contains("empty-bay-3").not().eval(&text));
}

#[tokio::test]
async fn test_pipeline_raw_passthrough() {
    let (base_url, server) = serve_once("200 OK", NODES_DOCUMENT).await;
    let temp = assert_fs::TempDir::new().unwrap();
    let config = write_config(&temp, &base_url).appliance_config().unwrap();

    let raw = create_service(config).unwrap().fetch_document().await.unwrap();
    server.await.unwrap();

    assert_eq!(raw, NODES_DOCUMENT.as_bytes());
}

#[tokio::test]
async fn test_pipeline_status_error_is_fatal() {
    let (base_url, server) = serve_once("401 Unauthorized", "user session expired").await;
    let temp = assert_fs::TempDir::new().unwrap();
    let config = write_config(&temp, &base_url).appliance_config().unwrap();

    let err = create_service(config)
        .unwrap()
        .collect_nodes()
        .await
        .unwrap_err();
    server.await.unwrap();

    match err {
        InventoryError::Fetch(FetchError::HttpStatus { status, body }) => {
            assert_eq!(status, 401);
            assert_eq!(body, "user session expired");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}
