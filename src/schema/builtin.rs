//! Types provided by the platform. They are referenced by id and never
//! exported into the manifest's `types` section.

/// Namespace prefix reserved for platform-provided types and functions.
pub const BUILTIN_NAMESPACE: &str = "slack#/";

/// The primitive a built-in type carries at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinBase {
    String,
    Number,
    Boolean,
    Object,
    Array,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinType {
    id: &'static str,
    base: BuiltinBase,
}

impl BuiltinType {
    pub const fn new(id: &'static str, base: BuiltinBase) -> Self {
        Self { id, base }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn base(&self) -> BuiltinBase {
        self.base
    }
}

pub const USER_ID: BuiltinType = BuiltinType::new("slack#/types/user_id", BuiltinBase::String);
pub const CHANNEL_ID: BuiltinType =
    BuiltinType::new("slack#/types/channel_id", BuiltinBase::String);
pub const USERGROUP_ID: BuiltinType =
    BuiltinType::new("slack#/types/usergroup_id", BuiltinBase::String);
pub const TIMESTAMP: BuiltinType = BuiltinType::new("slack#/types/timestamp", BuiltinBase::Number);
pub const DATE: BuiltinType = BuiltinType::new("slack#/types/date", BuiltinBase::String);
pub const MESSAGE_TS: BuiltinType =
    BuiltinType::new("slack#/types/message_ts", BuiltinBase::String);
pub const RICH_TEXT: BuiltinType = BuiltinType::new("slack#/types/rich_text", BuiltinBase::Object);
pub const BLOCKS: BuiltinType = BuiltinType::new("slack#/types/blocks", BuiltinBase::Array);
pub const INTERACTIVITY: BuiltinType =
    BuiltinType::new("slack#/types/interactivity", BuiltinBase::Object);
pub const OAUTH2: BuiltinType =
    BuiltinType::new("slack#/types/credential/oauth2", BuiltinBase::String);
pub const MESSAGE_CONTEXT: BuiltinType =
    BuiltinType::new("slack#/types/message_context", BuiltinBase::Object);

/// Looks up a built-in type by its full id.
pub fn lookup(id: &str) -> Option<BuiltinType> {
    [
        USER_ID,
        CHANNEL_ID,
        USERGROUP_ID,
        TIMESTAMP,
        DATE,
        MESSAGE_TS,
        RICH_TEXT,
        BLOCKS,
        INTERACTIVITY,
        OAUTH2,
        MESSAGE_CONTEXT,
    ]
    .into_iter()
    .find(|builtin| builtin.id == id)
}

/// Returns true if `id` lives in the reserved platform namespace.
pub fn is_reserved(id: &str) -> bool {
    id.starts_with(BUILTIN_NAMESPACE)
}
