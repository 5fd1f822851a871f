// Build script for fwenv - embeds version at compile time

fn main() {
    // Get version from environment (set by release CI) or Cargo.toml
    let version =
        std::env::var("FWENV_VERSION").unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=FWENV_VERSION={}", version);

    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-env-changed=FWENV_VERSION");
}
