//! Workspace tooling root. The Lambda lives in `crates/abk-hello-lambda`.
