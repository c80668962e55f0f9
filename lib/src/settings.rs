// Copyright 2025 The LocalGit Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! User-level configuration.

use std::env;

#[derive(Debug, Clone, Default)]
pub struct UserSettings {
    config: config::Config,
}

impl UserSettings {
    pub fn from_config(config: config::Config) -> Self {
        UserSettings { config }
    }

    /// Loads settings from `$XDG_CONFIG_HOME/localgit/config.toml` and
    /// `~/.localgitconfig` (both optional), with `LOCALGIT_USER` overriding
    /// `user.name`.
    pub fn for_user() -> Result<Self, config::ConfigError> {
        let mut config_builder = config::Config::builder();

        if let Some(config_dir) = dirs::config_dir() {
            config_builder = config_builder.add_source(
                config::File::from(config_dir.join("localgit/config.toml"))
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }
        if let Some(home_dir) = dirs::home_dir() {
            config_builder = config_builder.add_source(
                config::File::from(home_dir.join(".localgitconfig"))
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }
        if let Ok(value) = env::var("LOCALGIT_USER") {
            config_builder = config_builder.set_override("user.name", value)?;
        }

        let config = config_builder.build()?;
        Ok(Self::from_config(config))
    }

    /// The configured commit author, if any. The engine substitutes its own
    /// default when no author is known.
    pub fn user_name(&self) -> Option<String> {
        self.config.get_string("user.name").ok()
    }

    pub fn config(&self) -> &config::Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_name_from_config() {
        let config = config::Config::builder()
            .set_override("user.name", "Test User")
            .unwrap()
            .build()
            .unwrap();
        let settings = UserSettings::from_config(config);
        assert_eq!(settings.user_name().as_deref(), Some("Test User"));
    }

    #[test]
    fn test_user_name_unset() {
        let settings = UserSettings::from_config(config::Config::default());
        assert_eq!(settings.user_name(), None);
    }
}
