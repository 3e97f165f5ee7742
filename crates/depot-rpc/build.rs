//! Build script for depot-rpc - compiles protobuf definitions.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Use the vendored protoc binary so the build does not depend on a
    // system-installed protobuf compiler.
    if std::env::var_os("PROTOC").is_none() {
        if let Ok(protoc) = protoc_bin_vendored::protoc_bin_path() {
            std::env::set_var("PROTOC", protoc);
        }
    }
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&["proto/storage.proto"], &["proto"])?;
    Ok(())
}
