const EMBEDDED: [(&str, &str, &str); 2] = [
    (
        "src/default_settings.toml",
        include_str!("src/default_settings.toml"),
        "session",
    ),
    (
        "src/romaji/default_romaji.toml",
        include_str!("src/romaji/default_romaji.toml"),
        "spellings",
    ),
];

fn main() {
    // Embedded defaults are parsed with `expect` at runtime; fail the build instead.
    for (path, content, section) in EMBEDDED {
        println!("cargo:rerun-if-changed={path}");
        let value: toml::Table = content
            .parse()
            .unwrap_or_else(|e| panic!("{path} contains invalid TOML: {e}"));
        if !value.get(section).is_some_and(toml::Value::is_table) {
            panic!("{path} is missing the [{section}] table");
        }
    }
}
