//! Lookup of readers and writers by language name and file extension.
//!
//! The built-in front and back ends enabled by features are installed on
//! first use. Registering another reader or writer for a language already
//! present replaces it everywhere, including its extensions.

use crate::traits::{Reader, Writer};
use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock, RwLockReadGuard};
use tracing::debug;

/// Front and back ends in registration order, with lookup indexes.
#[derive(Default)]
struct Registry {
    readers: Vec<&'static dyn Reader>,
    writers: Vec<&'static dyn Writer>,
    /// Language -> index into `readers`.
    reader_languages: HashMap<&'static str, usize>,
    /// Extension without the dot -> index into `readers`.
    reader_extensions: HashMap<&'static str, usize>,
    writer_languages: HashMap<&'static str, usize>,
}

impl Registry {
    fn builtin() -> Self {
        #[allow(unused_mut)]
        let mut registry = Self::default();
        #[cfg(feature = "read-java")]
        registry.add_reader(&crate::input::java::JAVA_READER);
        #[cfg(feature = "read-kotlin")]
        registry.add_reader(&crate::input::kotlin::KOTLIN_READER);
        #[cfg(feature = "write-java")]
        registry.add_writer(&crate::output::java::JAVA_WRITER);
        #[cfg(feature = "write-kotlin")]
        registry.add_writer(&crate::output::kotlin::KOTLIN_WRITER);
        #[cfg(feature = "write-swift")]
        registry.add_writer(&crate::output::swift::SWIFT_WRITER);
        registry
    }

    fn add_reader(&mut self, reader: &'static dyn Reader) {
        let index = match self.reader_languages.get(reader.language()) {
            Some(&index) => {
                let replaced = std::mem::replace(&mut self.readers[index], reader);
                self.reader_extensions.retain(|_, i| *i != index);
                debug!(language = replaced.language(), "replaced reader");
                index
            }
            None => {
                self.readers.push(reader);
                self.readers.len() - 1
            }
        };
        self.reader_languages.insert(reader.language(), index);
        for &extension in reader.extensions() {
            self.reader_extensions.insert(extension, index);
        }
    }

    fn add_writer(&mut self, writer: &'static dyn Writer) {
        match self.writer_languages.get(writer.language()) {
            Some(&index) => {
                self.writers[index] = writer;
                debug!(language = writer.language(), "replaced writer");
            }
            None => {
                self.writers.push(writer);
                self.writer_languages
                    .insert(writer.language(), self.writers.len() - 1);
            }
        }
    }
}

static REGISTRY: OnceLock<RwLock<Registry>> = OnceLock::new();

fn registry() -> &'static RwLock<Registry> {
    REGISTRY.get_or_init(|| RwLock::new(Registry::builtin()))
}

fn read() -> RwLockReadGuard<'static, Registry> {
    registry().read().unwrap_or_else(PoisonError::into_inner)
}

/// Register a reader, replacing any reader for the same language.
pub fn register_reader(reader: &'static dyn Reader) {
    registry()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .add_reader(reader);
}

/// Register a writer, replacing any writer for the same language.
pub fn register_writer(writer: &'static dyn Writer) {
    registry()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .add_writer(writer);
}

pub fn reader_for_language(lang: &str) -> Option<&'static dyn Reader> {
    let registry = read();
    let index = *registry.reader_languages.get(lang)?;
    Some(registry.readers[index])
}

/// Reader for a file extension, given without the dot.
pub fn reader_for_extension(ext: &str) -> Option<&'static dyn Reader> {
    let registry = read();
    let index = *registry.reader_extensions.get(ext)?;
    Some(registry.readers[index])
}

pub fn writer_for_language(lang: &str) -> Option<&'static dyn Writer> {
    let registry = read();
    let index = *registry.writer_languages.get(lang)?;
    Some(registry.writers[index])
}

/// Every reader, in registration order.
pub fn readers() -> Vec<&'static dyn Reader> {
    read().readers.clone()
}

/// Every writer, in registration order.
pub fn writers() -> Vec<&'static dyn Writer> {
    read().writers.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::Emit;
    use crate::traits::{GenerateError, ReadError, ResolutionContext};
    use crossgen_ir::File;

    struct Scripted(&'static str, &'static [&'static str]);

    impl Reader for Scripted {
        fn language(&self) -> &'static str {
            self.0
        }

        fn extensions(&self) -> &'static [&'static str] {
            self.1
        }

        fn read(&self, _: &str, source: &str, _: &dyn ResolutionContext) -> Result<File, ReadError> {
            Err(ReadError::Unsupported(source.to_string()))
        }
    }

    struct Plain;

    impl Writer for Plain {
        fn language(&self) -> &'static str {
            "plain"
        }

        fn extension(&self) -> &'static str {
            "txt"
        }

        fn emit_file(&self, file: &File) -> Result<Vec<Emit>, GenerateError> {
            Ok(Emit::line(file.name.clone()))
        }
    }

    #[test]
    #[cfg(feature = "read-java")]
    fn java_reader_by_language() {
        let reader = reader_for_language("java").expect("java reader");
        assert_eq!(reader.language(), "java");
        assert!(reader.extensions().contains(&"java"));
    }

    #[test]
    #[cfg(feature = "read-kotlin")]
    fn kotlin_reader_by_extension() {
        let reader = reader_for_extension("kts").expect("kts extension");
        assert_eq!(reader.language(), "kotlin");
        assert!(reader_for_extension("rs").is_none());
    }

    #[test]
    #[cfg(feature = "write-swift")]
    fn swift_writer_by_language() {
        let writer = writer_for_language("swift").expect("swift writer");
        assert_eq!(writer.language(), "swift");
        assert_eq!(writer.extension(), "swift");
        assert!(writer_for_language("lua").is_none());
    }

    #[test]
    #[cfg(all(feature = "read-java", feature = "write-kotlin"))]
    fn java_to_kotlin_through_lookups() {
        let reader = reader_for_language("java").unwrap();
        let writer = writer_for_language("kotlin").unwrap();

        let ir = reader
            .read("Greeter.java", "public class Greeter { private int count; }", &crate::traits::NoContext)
            .unwrap();
        let kotlin = writer.write(&ir).unwrap();

        assert!(kotlin.contains("class Greeter"));
        assert!(kotlin.contains("count: Int"));
    }

    #[test]
    #[cfg(all(feature = "write-java", feature = "write-kotlin", feature = "write-swift"))]
    fn builtin_writers_in_order() {
        let languages: Vec<_> = Registry::builtin().writers.iter().map(|w| w.language()).collect();
        assert_eq!(languages, ["java", "kotlin", "swift"]);
    }

    #[test]
    fn replacing_a_reader_drops_its_old_extensions() {
        static OLD: Scripted = Scripted("toy", &["toy", "toyx"]);
        static NEW: Scripted = Scripted("toy", &["toy2"]);
        let mut registry = Registry::default();
        registry.add_reader(&OLD);
        registry.add_reader(&NEW);
        assert_eq!(registry.readers.len(), 1);
        assert!(!registry.reader_extensions.contains_key("toyx"));
        assert_eq!(registry.reader_extensions.get("toy2"), Some(&0));
        assert_eq!(registry.readers[0].extensions(), ["toy2"]);
    }

    #[test]
    fn registered_writer_is_found() {
        static PLAIN: Plain = Plain;
        register_writer(&PLAIN);
        let writer = writer_for_language("plain").expect("plain writer");
        let file = crossgen_ir::builders::FileBuilder::new("Notes").build().unwrap();
        assert!(writer.write(&file).unwrap().contains("Notes"));
        assert!(writers().iter().any(|w| w.language() == "plain"));
    }
}
