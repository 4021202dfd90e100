#![forbid(unsafe_code)]

/// `embed_migrations!` is not re-expanded when only the SQL files under
/// `src/migrations` change, so the build script asks cargo to rebuild the
/// crate whenever that directory is touched.
fn main() {
    println!("cargo:rerun-if-changed=./src/migrations");
}
