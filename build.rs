use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/index");
    println!("cargo:rerun-if-changed=.git/HEAD");

    println!("cargo::rustc-env=GIT_COMMIT_HASH=UNKNOWN!");
    match Command::new("git").args(["rev-parse", "HEAD"]).output() {
        Ok(output) if output.status.success() => match String::from_utf8(output.stdout) {
            Ok(hash) => {
                let hash = hash.trim();
                if !hash.is_empty() {
                    println!("cargo::rustc-env=GIT_COMMIT_HASH={}", hash)
                }
            }
            Err(_) => (),
        },
        _ => (),
    };
}
