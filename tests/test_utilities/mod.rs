//! Shared helpers for integration tests
#![allow(dead_code)]

pub mod mocks;

/// Builds a Dockerfile in the layout of the tracked images
pub fn dockerfile(version: &str, ref_name: &str, components: &[&str]) -> String {
    let mut text = format!(
        "FROM docker.io/bitnami/minideb:bookworm\n\n\
         LABEL org.opencontainers.image.ref.name={} \\\n      \
         org.opencontainers.image.version={}\n\n\
         RUN mkdir -p /tmp/bitnami/pkg/cache/ ; cd /tmp/bitnami/pkg/cache/ ; \\\n    \
         COMPONENTS=( \\\n",
        ref_name, version
    );
    for component in components {
        text.push_str(&format!("      \"{}\" \\\n", component));
    }
    text.push_str("    ) ; \\\n    for COMPONENT in \"${COMPONENTS[@]}\"; do \\\n      echo \"$COMPONENT\" ; \\\n    done\n");
    text
}
