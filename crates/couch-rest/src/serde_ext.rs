//! Serde adapters shared by the model types.

/// Base64-encoded byte fields: binary in memory, base64 string on the wire.
pub(crate) mod base64_bytes {
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        data: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match data {
            Some(bytes) => serializer.serialize_str(&BASE64.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        let value: Option<String> = Option::deserialize(deserializer)?;
        match value {
            Some(encoded) => BASE64
                .decode(encoded.as_bytes())
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Holder {
        #[serde(
            default,
            with = "super::base64_bytes",
            skip_serializing_if = "Option::is_none"
        )]
        data: Option<Vec<u8>>,
    }

    #[test]
    fn test_round_trip() {
        let holder = Holder {
            data: Some(vec![0, 1, 2, 254, 255]),
        };
        let json = serde_json::to_string(&holder).unwrap();
        assert_eq!(json, r#"{"data":"AAEC/v8="}"#);
        let back: Holder = serde_json::from_str(&json).unwrap();
        assert_eq!(back, holder);
    }

    #[test]
    fn test_unset_is_omitted() {
        let json = serde_json::to_string(&Holder { data: None }).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_malformed_base64_fails() {
        let err = serde_json::from_str::<Holder>(r#"{"data":"not@@base64"}"#).unwrap_err();
        assert!(err.to_string().contains("Invalid"));
    }
}
