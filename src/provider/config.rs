/*
 *
 *  *
 *  *      Copyright (c) 2018-2025, SnackCloud All rights reserved.
 *  *
 *  *   Redistribution and use in source and binary forms, with or without
 *  *   modification, are permitted provided that the following conditions are met:
 *  *
 *  *   Redistributions of source code must retain the above copyright notice,
 *  *   this list of conditions and the following disclaimer.
 *  *   Redistributions in binary form must reproduce the above copyright
 *  *   notice, this list of conditions and the following disclaimer in the
 *  *   documentation and/or other materials provided with the distribution.
 *  *   Neither the name of the www.snackcloud.cn developer nor the names of its
 *  *   contributors may be used to endorse or promote products derived from
 *  *   this software without specific prior written permission.
 *  *   Author: SnackCloud
 *  *
 *
 */
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// The "providers" configuration section: custom providers declared by
/// constructor key. The key is looked up in the customizer's constructor
/// table; there is no runtime type loading.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub providers: Vec<CustomProviderConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomProviderConfig {
    pub name: String,
    /// Constructor key registered on the customizer.
    #[serde(rename = "type")]
    pub constructor: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl ProvidersConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider_section() {
        let config = ProvidersConfig::from_json(
            r#"{
                "providers": [
                    { "name": "TiDb", "type": "mysql_like", "aliases": ["Ti"] }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(config.providers.len(), 1);
        assert_eq!(config.providers[0].constructor, "mysql_like");
        assert_eq!(config.providers[0].aliases, vec!["Ti"]);
    }

    #[test]
    fn test_malformed_section_is_an_error() {
        assert!(ProvidersConfig::from_json("{ \"providers\": 1 }").is_err());
    }
}
