pub const CMD_STR: &str = "version";

pub fn version() {
    println!("scaffold version {}", crate::VERSION);
}
