//! Extension-to-language hints for fenced code rendering.

/// Derive a syntax highlighting hint from a file path.
///
/// Matching is case-insensitive and only the final dot-segment of the
/// basename counts (`foo.test.py` matches `.py`). Both `/` and `\` are
/// honored as path separators. Unknown extensions yield the bare lower-cased
/// extension; paths without an extension yield an empty hint. The extensionless
/// basename `Dockerfile` is special-cased.
#[must_use]
pub fn syntax_hint(path: &str) -> String {
    let basename = path
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(path);

    if basename.eq_ignore_ascii_case("dockerfile") {
        return "dockerfile".to_string();
    }

    let Some((stem, ext)) = basename.rsplit_once('.') else {
        return String::new();
    };
    if stem.is_empty() {
        // Dotfiles like `.gitignore` carry no extension in this sense.
        return String::new();
    }

    let ext = ext.to_ascii_lowercase();
    let hint = match ext.as_str() {
        "py" => "python",
        "rs" => "rust",
        "js" | "mjs" | "cjs" => "javascript",
        "jsx" => "jsx",
        "ts" => "typescript",
        "tsx" => "tsx",
        "java" => "java",
        "go" => "go",
        "c" | "h" => "c",
        "cpp" | "cc" | "cxx" | "hpp" | "hxx" => "cpp",
        "cs" => "csharp",
        "rb" => "ruby",
        "php" => "php",
        "swift" => "swift",
        "kt" | "kts" => "kotlin",
        "scala" => "scala",
        "sh" | "bash" => "bash",
        "zsh" => "zsh",
        "ps1" => "powershell",
        "mk" => "makefile",
        "html" | "htm" => "html",
        "css" => "css",
        "scss" => "scss",
        "sass" => "sass",
        "less" => "less",
        "json" => "json",
        "yaml" | "yml" => "yaml",
        "toml" => "toml",
        "md" | "markdown" => "markdown",
        "rst" => "rest",
        "sql" => "sql",
        "xml" => "xml",
        _ => return ext,
    };
    hint.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extensions() {
        assert_eq!(syntax_hint("main.py"), "python");
        assert_eq!(syntax_hint("script.PY"), "python");
        assert_eq!(syntax_hint("foo.test.py"), "python");
        assert_eq!(syntax_hint("index.html"), "html");
        assert_eq!(syntax_hint("style.scss"), "scss");
        assert_eq!(syntax_hint("file.json"), "json");
        assert_eq!(syntax_hint("readme.md"), "markdown");
        assert_eq!(syntax_hint("rstfile.rst"), "rest");
        assert_eq!(syntax_hint("folder/folder2/run.sh"), "bash");
        assert_eq!(syntax_hint("build.mk"), "makefile");
        assert_eq!(syntax_hint("Dockerfile"), "dockerfile");
        assert_eq!(syntax_hint("main.ts"), "typescript");
        assert_eq!(syntax_hint("main.java"), "java");
        assert_eq!(syntax_hint("foo.go"), "go");
        assert_eq!(syntax_hint("code.cpp"), "cpp");
        assert_eq!(syntax_hint(r"folder.1\file.hello.cxx"), "cpp");
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(syntax_hint("thing.qqq"), "qqq");
        assert_eq!(syntax_hint("thing.QQQ"), "qqq");
        assert_eq!(syntax_hint("noext"), "");
    }

    #[test]
    fn test_dotfiles_have_no_hint() {
        assert_eq!(syntax_hint(".gitignore"), "");
        assert_eq!(syntax_hint("dir/.env"), "");
    }
}
