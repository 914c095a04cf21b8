pub mod list;
pub mod new;
pub mod version;

pub const CONFIG_ARG: &str = "config_dir";
pub const SOURCE_ARG: &str = "SOURCE";
pub const TEMPLATE_ARG: &str = "template";
pub const NAME_ARG: &str = "name";
pub const LOCATION_ARG: &str = "location";
pub const DRY_RUN_ARG: &str = "dry-run";
pub const LIST_TEMPLATES_ARG: &str = "list-templates";
pub const INIT_GIT_ARG: &str = "init-git";
pub const SKIP_VALIDATION_ARG: &str = "skip-validation";
