//! Cursor iteration options shared by SCAN, HSCAN, SSCAN and ZSCAN.
//!
//! The cursor itself is opaque: whatever the server returned is passed back
//! unchanged, starting from `"0"`.

use bytes::Bytes;

use crate::command::{Builder, RequestType};
use crate::error::{Result, unsupported_combination};
use crate::token;

/// The cursor that starts a new iteration.
pub const INITIAL_CURSOR: &[u8] = b"0";

/// Value type filter for the keyspace SCAN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    String,
    List,
    Set,
    ZSet,
    Hash,
    Stream,
}

impl ObjectType {
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            ObjectType::String => b"string",
            ObjectType::List => b"list",
            ObjectType::Set => b"set",
            ObjectType::ZSet => b"zset",
            ObjectType::Hash => b"hash",
            ObjectType::Stream => b"stream",
        }
    }
}

/// Optional arguments of a scan call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScanOptions {
    pub match_pattern: Option<Bytes>,
    pub count: Option<u64>,
    /// SCAN only.
    pub object_type: Option<ObjectType>,
    /// HSCAN only.
    pub no_values: bool,
    /// ZSCAN only.
    pub no_scores: bool,
}

impl ScanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn match_pattern(mut self, pattern: impl AsRef<[u8]>) -> Self {
        self.match_pattern = Some(token::bytes(pattern));
        self
    }

    pub fn count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    pub fn object_type(mut self, object_type: ObjectType) -> Self {
        self.object_type = Some(object_type);
        self
    }

    pub fn no_values(mut self) -> Self {
        self.no_values = true;
        self
    }

    pub fn no_scores(mut self) -> Self {
        self.no_scores = true;
        self
    }

    /// Append `[MATCH p] [COUNT n] [TYPE t] [NOVALUES] [NOSCORES]`, refusing
    /// variant-specific flags on the wrong command.
    pub(crate) fn encode(&self, cmd: &mut Builder, variant: RequestType) -> Result<()> {
        if self.object_type.is_some() && variant != RequestType::Scan {
            return Err(unsupported_combination(format!(
                "TYPE is only valid for SCAN, not {}",
                variant.name()
            )));
        }
        if self.no_values && variant != RequestType::HScan {
            return Err(unsupported_combination(format!(
                "NOVALUES is only valid for HSCAN, not {}",
                variant.name()
            )));
        }
        if self.no_scores && variant != RequestType::ZScan {
            return Err(unsupported_combination(format!(
                "NOSCORES is only valid for ZSCAN, not {}",
                variant.name()
            )));
        }
        if let Some(pattern) = &self.match_pattern {
            cmd.keyword(b"MATCH").token(pattern.clone());
        }
        if let Some(count) = self.count {
            cmd.keyword(b"COUNT").int(count);
        }
        if let Some(object_type) = self.object_type {
            cmd.keyword(b"TYPE").keyword(object_type.as_bytes());
        }
        cmd.flag(self.no_values, b"NOVALUES")
            .flag(self.no_scores, b"NOSCORES");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(opts: &ScanOptions, variant: RequestType) -> Result<Vec<Bytes>> {
        let mut cmd = Builder::new(variant);
        opts.encode(&mut cmd, variant)?;
        Ok(cmd.finish().into_parts().1)
    }

    #[test]
    fn test_empty_options() {
        assert!(encode(&ScanOptions::new(), RequestType::SScan).unwrap().is_empty());
    }

    #[test]
    fn test_keyspace_options() {
        let opts = ScanOptions::new()
            .match_pattern("user:*")
            .count(100)
            .object_type(ObjectType::Hash);
        assert_eq!(
            encode(&opts, RequestType::Scan).unwrap(),
            ["MATCH", "user:*", "COUNT", "100", "TYPE", "hash"]
        );
    }

    #[test]
    fn test_novalues_only_for_hscan() {
        let opts = ScanOptions::new().no_values();
        assert_eq!(encode(&opts, RequestType::HScan).unwrap(), ["NOVALUES"]);
        assert!(
            encode(&opts, RequestType::ZScan)
                .unwrap_err()
                .is_unsupported_combination()
        );
    }

    #[test]
    fn test_noscores_only_for_zscan() {
        let opts = ScanOptions::new().no_scores();
        assert_eq!(encode(&opts, RequestType::ZScan).unwrap(), ["NOSCORES"]);
        assert!(encode(&opts, RequestType::Scan).is_err());
    }

    #[test]
    fn test_type_only_for_scan() {
        let opts = ScanOptions::new().object_type(ObjectType::Stream);
        assert!(
            encode(&opts, RequestType::HScan)
                .unwrap_err()
                .is_unsupported_combination()
        );
    }
}
