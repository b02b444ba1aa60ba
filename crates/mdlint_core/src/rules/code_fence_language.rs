//! MD1400: code fence language.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer};

use crate::rule::{Rule, RuleContext, RuleMeta};
use crate::{Finding, Severity};

/// Language identifiers accepted when no allowlist is configured.
const KNOWN_LANGUAGES: &[&str] = &[
    "ada", "apache", "applescript", "asm", "awk", "bash", "bat", "batch", "bibtex", "c",
    "c#", "c++", "clojure", "cmake", "cmd", "coffeescript", "console", "cpp", "crystal", "cs",
    "csharp", "css", "csv", "cuda", "d", "dart", "diff", "docker", "dockerfile", "dot",
    "elixir", "elm", "erb", "erlang", "f#", "fish", "fortran", "fsharp", "gherkin", "glsl",
    "go", "gql", "graphql", "groovy", "haml", "handlebars", "haskell", "hcl", "hs", "html",
    "http", "ini", "java", "javascript", "jinja", "js", "json", "json5", "jsonc", "jsx",
    "julia", "kotlin", "kt", "latex", "less", "lisp", "llvm", "lua", "make", "makefile",
    "markdown", "matlab", "md", "mermaid", "nginx", "nim", "nix", "objc", "objective-c",
    "ocaml", "perl", "php", "pl", "plaintext", "postgresql", "powershell", "prolog",
    "properties", "proto", "protobuf", "ps1", "py", "python", "r", "racket", "rb", "regex",
    "rs", "rst", "ruby", "rust", "sass", "scala", "scheme", "scss", "sh", "shell",
    "shell-session", "sql", "swift", "systemd", "tcl", "terraform", "tex", "text", "tf",
    "toml", "ts", "tsx", "txt", "typescript", "vb", "verilog", "vhdl", "vim", "vue", "wasm",
    "wat", "xml", "yaml", "yml", "zig", "zsh",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodeFenceLanguageConfig {
    /// Permitted languages, case-insensitive. Empty means any known language.
    #[serde(deserialize_with = "lowercase_set")]
    pub allowed: HashSet<String>,
}

fn lowercase_set<'de, D>(deserializer: D) -> Result<HashSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let langs = Vec::<String>::deserialize(deserializer)?;
    Ok(langs.into_iter().map(|l| l.to_lowercase()).collect())
}

/// Reports fenced code blocks whose language is missing, unknown or not allowed.
pub struct CodeFenceLanguage;

impl Rule for CodeFenceLanguage {
    type Config = CodeFenceLanguageConfig;

    fn meta(&self) -> RuleMeta {
        RuleMeta {
            id: "MD1400",
            name: "code-fence-language",
            description: "Fenced code blocks must declare a recognized language",
            default_severity: Severity::Warning,
        }
    }

    fn apply(&self, ctx: &RuleContext<'_>, config: &Self::Config) -> Vec<Finding> {
        ctx.document
            .code_blocks()
            .iter()
            .filter(|block| block.fenced)
            .filter_map(|block| {
                let message = match block.lang.as_deref().map(str::to_lowercase) {
                    None => "Code fence is missing a language identifier".to_string(),
                    Some(lang) if !config.allowed.is_empty() => {
                        if config.allowed.contains(&lang) {
                            return None;
                        }
                        format!("Language \"{}\" not allowed", lang)
                    }
                    Some(lang) => {
                        if KNOWN_LANGUAGES.binary_search(&lang.as_str()).is_ok() {
                            return None;
                        }
                        format!("Unknown language \"{}\"", lang)
                    }
                };
                Some(Finding::new(
                    "MD1400",
                    block.lines.start,
                    block.column,
                    message,
                ))
            })
            .collect()
    }
}
