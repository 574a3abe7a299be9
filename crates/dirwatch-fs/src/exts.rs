//! Built-in table of text file extensions.

/// Extensions (without the dot) treated as text by [`TextFileFilter`].
///
/// [`TextFileFilter`]: crate::TextFileFilter
pub const TEXT_FILE_EXTS: &[&str] = &[
    // Web
    "asp", "aspx", "css", "ctp", "hta", "htm", "html", "js", "less", "php", "sass", "scss",
    "shtml", "xhtml",
    // Android, Java, Kotlin
    "classpath", "java", "kt", "prefs", "project", "properties",
    // C and C++
    "c", "cc", "cpp", "cxx", "fd", "h", "hc", "hh", "hpp", "hxx", "odl", "plg", "workspace",
    // C#
    "cs", "user", "xsd", "xsx",
    // Git
    "gitignore",
    // Visual Basic
    "bas", "cls", "ctl", "dep", "frm", "pdm",
    // Visual Studio and other project files
    "cbp", "clw", "csproj", "def", "dsp", "dsw", "layout", "manifest", "rc", "rc2", "resx",
    "sln", "vbp", "vbw", "vcp", "vcproj", "vcw", "vcxproj",
    // Help sources
    "hhc", "hhk", "hhp",
    // Markup
    "json", "jsonp", "rgon", "svg", "xaml", "xml", "yml",
    // Assorted sources, scripts and data
    "asm", "asn", "bat", "cfg", "csv", "dpr", "go", "hs", "clj", "cljs", "jcl", "log", "mak",
    "md", "meta", "pas", "ph", "pl", "pm", "py", "rb", "reg", "rs", "rules", "settings", "sh",
    "sql", "tlh", "tli", "ts", "txt", "xs",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_lowercase_without_dots() {
        for ext in TEXT_FILE_EXTS {
            assert!(!ext.is_empty());
            assert!(!ext.contains('.'), "{ext} contains a dot");
            assert_eq!(*ext, ext.to_ascii_lowercase());
        }
    }

    #[test]
    fn test_table_has_no_duplicates() {
        let mut sorted = TEXT_FILE_EXTS.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), TEXT_FILE_EXTS.len());
        assert_eq!(TEXT_FILE_EXTS.len(), 104);
    }
}
