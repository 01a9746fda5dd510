// build.rs

fn main() {
    // Link against Xlib. pkg-config first, plain -lX11 if it can't find the .pc file.
    if let Err(err) = pkg_config::probe_library("x11") {
        eprintln!(
            "pkg-config failed for library 'x11' ({}). Falling back to manual linking.",
            err
        );
        println!("cargo:rustc-link-lib=X11");
        println!("cargo:rustc-link-search=/usr/lib");
    }
}
