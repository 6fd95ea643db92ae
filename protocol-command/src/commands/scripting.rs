use bytes::Bytes;

use super::FlushMode;
use crate::command::{Builder, CommandSpec, RequestType};

/// How FUNCTION RESTORE treats existing libraries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionRestorePolicy {
    /// Abort on a library name collision.
    Append,
    /// Delete every existing library first.
    Flush,
    /// Replace libraries with colliding names.
    Replace,
}

impl FunctionRestorePolicy {
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            FunctionRestorePolicy::Append => b"APPEND",
            FunctionRestorePolicy::Flush => b"FLUSH",
            FunctionRestorePolicy::Replace => b"REPLACE",
        }
    }
}

/// Options for FUNCTION LIST.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FunctionListOptions {
    pub library_name_pattern: Option<Bytes>,
    /// Include library source (`WITHCODE`).
    pub with_code: bool,
}

fn bare(request_type: RequestType) -> CommandSpec {
    Builder::new(request_type).finish()
}

// ── Functions ───────────────────────────────────────────────────────────

/// `FCALL function numkeys key ... arg ...`
pub fn create_fcall<K, A>(function: impl AsRef<[u8]>, keys: K, args: A) -> CommandSpec
where
    K: IntoIterator,
    K::Item: AsRef<[u8]>,
    A: IntoIterator,
    A::Item: AsRef<[u8]>,
{
    fcall(RequestType::FCall, function, keys, args)
}

/// `FCALL_RO function numkeys key ... arg ...`
pub fn create_fcall_read_only<K, A>(function: impl AsRef<[u8]>, keys: K, args: A) -> CommandSpec
where
    K: IntoIterator,
    K::Item: AsRef<[u8]>,
    A: IntoIterator,
    A::Item: AsRef<[u8]>,
{
    fcall(RequestType::FCallReadOnly, function, keys, args)
}

fn fcall<K, A>(request_type: RequestType, function: impl AsRef<[u8]>, keys: K, args: A) -> CommandSpec
where
    K: IntoIterator,
    K::Item: AsRef<[u8]>,
    A: IntoIterator,
    A::Item: AsRef<[u8]>,
{
    let keys = super::collect(keys);
    let mut cmd = Builder::new(request_type);
    cmd.arg(function).int(keys.len());
    for key in keys {
        cmd.token(key);
    }
    cmd.args(args);
    cmd.finish()
}

/// `FUNCTION LOAD [REPLACE] library-code`
pub fn create_function_load(library_code: impl AsRef<[u8]>, replace: bool) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::FunctionLoad);
    cmd.flag(replace, b"REPLACE").arg(library_code);
    cmd.finish()
}

pub fn create_function_delete(library_name: impl AsRef<[u8]>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::FunctionDelete);
    cmd.arg(library_name);
    cmd.finish()
}

/// `FUNCTION FLUSH [SYNC|ASYNC]`
pub fn create_function_flush(mode: Option<FlushMode>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::FunctionFlush);
    if let Some(mode) = mode {
        cmd.keyword(mode.as_bytes());
    }
    cmd.finish()
}

/// `FUNCTION LIST [LIBRARYNAME pattern] [WITHCODE]`
pub fn create_function_list(options: &FunctionListOptions) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::FunctionList);
    if let Some(pattern) = &options.library_name_pattern {
        cmd.keyword(b"LIBRARYNAME").token(pattern.clone());
    }
    cmd.flag(options.with_code, b"WITHCODE");
    cmd.finish()
}

pub fn create_function_stats() -> CommandSpec {
    bare(RequestType::FunctionStats)
}

pub fn create_function_kill() -> CommandSpec {
    bare(RequestType::FunctionKill)
}

pub fn create_function_dump() -> CommandSpec {
    bare(RequestType::FunctionDump)
}

/// `FUNCTION RESTORE payload [APPEND|FLUSH|REPLACE]`
pub fn create_function_restore(
    payload: impl AsRef<[u8]>,
    policy: Option<FunctionRestorePolicy>,
) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::FunctionRestore);
    cmd.arg(payload);
    if let Some(policy) = policy {
        cmd.keyword(policy.as_bytes());
    }
    cmd.finish()
}

// ── Scripts ─────────────────────────────────────────────────────────────

pub fn create_script_exists<I>(sha1s: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut cmd = Builder::new(RequestType::ScriptExists);
    cmd.args(sha1s);
    cmd.finish()
}

/// `SCRIPT FLUSH [SYNC|ASYNC]`
pub fn create_script_flush(mode: Option<FlushMode>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::ScriptFlush);
    if let Some(mode) = mode {
        cmd.keyword(mode.as_bytes());
    }
    cmd.finish()
}

pub fn create_script_kill() -> CommandSpec {
    bare(RequestType::ScriptKill)
}

pub fn create_script_show(sha1: impl AsRef<[u8]>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::ScriptShow);
    cmd.arg(sha1);
    cmd.finish()
}

// ── Custom ──────────────────────────────────────────────────────────────

/// An arbitrary command; the first argument names it.
pub fn create_custom_command<I>(args: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut cmd = Builder::new(RequestType::CustomCommand);
    cmd.args(args);
    cmd.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fcall_numkeys() {
        let cmd = create_fcall("myfunc", ["k1", "k2"], ["a"]);
        assert_eq!(cmd.args(), &["myfunc", "2", "k1", "k2", "a"]);
        let cmd = create_fcall_read_only("f", Vec::<&str>::new(), Vec::<&str>::new());
        assert_eq!(cmd.args(), &["f", "0"]);
    }

    #[test]
    fn test_function_load_replace_first() {
        let cmd = create_function_load("#!lua name=lib\n", true);
        assert_eq!(cmd.args(), &["REPLACE", "#!lua name=lib\n"]);
    }

    #[test]
    fn test_function_list() {
        let opts = FunctionListOptions {
            library_name_pattern: Some(Bytes::from_static(b"my*")),
            with_code: true,
        };
        assert_eq!(
            create_function_list(&opts).args(),
            &["LIBRARYNAME", "my*", "WITHCODE"]
        );
    }

    #[test]
    fn test_function_restore_binary_payload() {
        let payload = [0xf5u8, 0xc3, 0x00];
        let cmd = create_function_restore(payload, Some(FunctionRestorePolicy::Replace));
        assert_eq!(&cmd.args()[0][..], &payload[..]);
        assert_eq!(cmd.args()[1], "REPLACE");
    }

    #[test]
    fn test_script_commands() {
        assert_eq!(
            create_script_flush(Some(FlushMode::Sync)).command_line(),
            vec!["SCRIPT", "FLUSH", "SYNC"]
        );
        assert_eq!(create_script_exists(["abc"]).args(), &["abc"]);
    }

    #[test]
    fn test_custom_command() {
        let cmd = create_custom_command(["CLIENT", "SETNAME", "me"]);
        assert_eq!(cmd.request_type(), RequestType::CustomCommand);
        assert_eq!(cmd.command_line(), vec!["CLIENT", "SETNAME", "me"]);
    }
}
