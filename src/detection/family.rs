use std::fmt;
use std::path::Path;

const PYTHON_EXTENSIONS: &[&str] = &["py"];
const CPP_EXTENSIONS: &[&str] = &["cpp", "cxx", "cc", "c", "hpp", "hxx", "h"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageFamily {
    Python,
    Cpp,
}

impl LanguageFamily {
    pub const ALL: [LanguageFamily; 2] = [LanguageFamily::Python, LanguageFamily::Cpp];

    /// Maps a file to its family by extension, ignoring case. `None` means the
    /// file is never classified.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if PYTHON_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Python)
        } else if CPP_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Cpp)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Cpp => "cpp",
        }
    }
}

impl fmt::Display for LanguageFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_python() {
        assert_eq!(
            LanguageFamily::from_path(Path::new("talker.py")),
            Some(LanguageFamily::Python)
        );
    }

    #[test]
    fn test_from_path_cpp_variants() {
        for name in ["a.cpp", "a.cxx", "a.cc", "a.c", "a.hpp", "a.hxx", "a.h"] {
            assert_eq!(
                LanguageFamily::from_path(Path::new(name)),
                Some(LanguageFamily::Cpp),
                "{name}"
            );
        }
    }

    #[test]
    fn test_from_path_is_case_insensitive() {
        assert_eq!(
            LanguageFamily::from_path(Path::new("NODE.PY")),
            Some(LanguageFamily::Python)
        );
        assert_eq!(
            LanguageFamily::from_path(Path::new("node.CPP")),
            Some(LanguageFamily::Cpp)
        );
    }

    #[test]
    fn test_from_path_unknown() {
        assert_eq!(LanguageFamily::from_path(Path::new("package.xml")), None);
        assert_eq!(LanguageFamily::from_path(Path::new("CMakeLists.txt")), None);
        assert_eq!(LanguageFamily::from_path(Path::new("README")), None);
    }

    #[test]
    fn test_as_str() {
        assert_eq!(LanguageFamily::Python.as_str(), "python");
        assert_eq!(LanguageFamily::Cpp.to_string(), "cpp");
    }
}
