use diagroup_core::error::CoreError;

/// Default field holding the shape array in task inputs and solution outputs.
pub const DEFAULT_DATA_FIELD: &str = "outlines";

/// Default field holding the image key in task inputs.
pub const DEFAULT_IMAGE_FIELD: &str = "image";

/// Default processor name used in log output.
pub const DEFAULT_NAME: &str = "join_elements";

/// Settings for the [`JoinElements`](crate::JoinElements) processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinConfig {
    /// Processor name used in log output.
    pub name: String,
    /// Field holding the shape array in task inputs and solution outputs.
    pub data_field: String,
    /// Field holding the image key in task inputs.
    pub image_field: String,
    /// Pool that receives the generated tasks.
    pub target_pool_id: String,
    /// Workers that must not see the generated tasks.
    pub blocklist: Vec<String>,
}

impl JoinConfig {
    /// Defaults for everything except the target pool.
    pub fn new(target_pool_id: impl Into<String>) -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            data_field: DEFAULT_DATA_FIELD.to_string(),
            image_field: DEFAULT_IMAGE_FIELD.to_string(),
            target_pool_id: target_pool_id.into(),
            blocklist: Vec::new(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// | Env Var               | Default         |
    /// |-----------------------|-----------------|
    /// | `JOIN_TARGET_POOL_ID` | required        |
    /// | `JOIN_NAME`           | `join_elements` |
    /// | `JOIN_DATA_FIELD`     | `outlines`      |
    /// | `JOIN_IMAGE_FIELD`    | `image`         |
    /// | `JOIN_BLOCKLIST`      | empty           |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let target_pool_id = get("JOIN_TARGET_POOL_ID").ok_or_else(|| {
            CoreError::Validation("JOIN_TARGET_POOL_ID must be set".to_string())
        })?;

        let mut config = Self::new(target_pool_id);
        if let Some(name) = get("JOIN_NAME") {
            config.name = name;
        }
        if let Some(field) = get("JOIN_DATA_FIELD") {
            config.data_field = field;
        }
        if let Some(field) = get("JOIN_IMAGE_FIELD") {
            config.image_field = field;
        }
        if let Some(list) = get("JOIN_BLOCKLIST") {
            config.blocklist = list
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.target_pool_id.trim().is_empty() {
            return Err(CoreError::Validation(
                "target pool id must not be empty".to_string(),
            ));
        }
        if self.data_field.trim().is_empty() || self.image_field.trim().is_empty() {
            return Err(CoreError::Validation(
                "payload field names must not be empty".to_string(),
            ));
        }
        if self.data_field == self.image_field {
            return Err(CoreError::Validation(format!(
                "data field and image field must differ, both are '{}'",
                self.data_field
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
