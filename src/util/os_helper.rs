/// Author name for generated files. Falls back to the OS user when none is given.
pub fn get_author(name: Option<&str>) -> String {
    if let Some(name) = name {
        return name.to_string();
    }

    let name = whoami::realname();
    if name.is_empty() {
        return whoami::username();
    }
    name
}
