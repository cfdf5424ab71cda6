/// (De)serialize `tracing::Level` as its lowercase name
pub mod level {
    use serde::{ Deserialize, Deserializer, Serializer };
    use std::str::FromStr;
    use tracing::Level;

    pub fn serialize<S>(level: &Level, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        serializer.serialize_str(&level.as_str().to_lowercase())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Level, D::Error>
        where D: Deserializer<'de>
    {
        let raw = String::deserialize(deserializer)?;
        Level::from_str(&raw).map_err(|_| {
            serde::de::Error::custom(
                format!("unknown log level '{}', expected trace, debug, info, warn or error", raw)
            )
        })
    }
}
