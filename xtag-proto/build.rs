//! Build script for the XTag gRPC schema.
//!
//! Walks `schemas/protos` for `.proto` files and hands them to tonic_build,
//! generating both the server trait used by the tagger and the client used by callers.

use std::fs;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let proto_dir = "../schemas/protos";
    let proto_files = collect_protos(proto_dir)?;
    if proto_files.is_empty() {
        return Err(format!("No .proto files found under {}", proto_dir).into());
    }

    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&proto_files, &[proto_dir])?;

    println!("cargo:rerun-if-changed={}", proto_dir);
    for proto_file in &proto_files {
        println!("cargo:rerun-if-changed={}", proto_file);
    }
    Ok(())
}

/// Recursively collects every `.proto` file below `dir`, sorted so codegen is stable.
fn collect_protos<P: AsRef<Path>>(dir: P) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let mut found = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            found.extend(collect_protos(&path)?);
        } else if path.extension().and_then(|ext| ext.to_str()) == Some("proto") {
            if let Some(path_str) = path.to_str() {
                found.push(path_str.to_string());
            }
        }
    }

    found.sort();
    Ok(found)
}
