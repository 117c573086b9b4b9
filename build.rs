use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    if env::var_os("CARGO_FEATURE_SYSTEM").is_none() {
        return;
    }

    // fftw-sys links fftw3 and fftw3f itself; the threads libraries
    // that `init_threads` needs are separate.
    for lib in &["fftw3", "fftw3f"] {
        match pkg_config::Config::new().cargo_metadata(false).probe(lib) {
            Ok(found) => {
                for path in &found.link_paths {
                    println!("cargo:rustc-link-search=native={}", path.display());
                }
            }
            Err(e) => {
                println!("cargo:warning=pkg-config could not find {}: {}", lib, e);
            }
        }
        println!("cargo:rustc-link-lib={}_threads", lib);
    }
}
