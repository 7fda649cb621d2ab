use serde::{Deserialize, Serialize};

/// UI language. Selected via `locale` in `config.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Locale {
    #[default]
    En,
    ZhHans,
}

/// Stable identifiers for every user-visible string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringId {
    Title,
    HostLabel,
    HostPlaceholder,
    RouteLabel,
    RoutePlaceholder,
    ParamsLabel,
    Key,
    Value,
    Start,
    AddRow,
    Preview,
    UrlInvalid,
    Opened,
    Copied,
}

impl StringId {
    pub const ALL: [StringId; 14] = [
        StringId::Title,
        StringId::HostLabel,
        StringId::HostPlaceholder,
        StringId::RouteLabel,
        StringId::RoutePlaceholder,
        StringId::ParamsLabel,
        StringId::Key,
        StringId::Value,
        StringId::Start,
        StringId::AddRow,
        StringId::Preview,
        StringId::UrlInvalid,
        StringId::Opened,
        StringId::Copied,
    ];
}

/// Look up a string for the given locale.
pub fn text(locale: Locale, id: StringId) -> &'static str {
    match locale {
        Locale::En => en(id),
        Locale::ZhHans => zh_hans(id),
    }
}

fn en(id: StringId) -> &'static str {
    match id {
        StringId::Title => "URL Jump",
        StringId::HostLabel => "Host",
        StringId::HostPlaceholder => "scheme://host, e.g. myapp://open",
        StringId::RouteLabel => "Route",
        StringId::RoutePlaceholder => "path/to/page",
        StringId::ParamsLabel => "Params",
        StringId::Key => "key",
        StringId::Value => "value",
        StringId::Start => "Start",
        StringId::AddRow => "Add param",
        StringId::Preview => "URL",
        StringId::UrlInvalid => "Host is empty, please enter a host",
        StringId::Opened => "Opened",
        StringId::Copied => "Copied URL",
    }
}

fn zh_hans(id: StringId) -> &'static str {
    match id {
        StringId::Title => "URL 跳转",
        StringId::HostLabel => "主机",
        StringId::HostPlaceholder => "scheme://host，例如 myapp://open",
        StringId::RouteLabel => "路由",
        StringId::RoutePlaceholder => "path/to/page",
        StringId::ParamsLabel => "参数",
        StringId::Key => "键",
        StringId::Value => "值",
        StringId::Start => "启动",
        StringId::AddRow => "添加参数",
        StringId::Preview => "URL",
        StringId::UrlInvalid => "主机为空，请输入主机地址",
        StringId::Opened => "已打开",
        StringId::Copied => "已复制 URL",
    }
}
