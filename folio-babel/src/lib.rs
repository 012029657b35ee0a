//! Markdown storage codec for rich-text editor documents
//!
//!     The editor works on a tree of typed nodes (doc, paragraph, heading, lists, code blocks,
//!     marked text, ...). Storage is plain Markdown. This crate converts between the two:
//!     encode on save, decode on load.
//!
//!     TLDR:
//!         - encode / decode (./codec.rs) never fail; bad input degrades to text, never to an error.
//!         - The tree lives in ./ir, with its JSON wire shape (./ir/wire.rs) and an explicit,
//!           opt-in validation pass (./ir/validate.rs).
//!         - Markdown is one format among others behind the Format trait, so tools can convert
//!           to JSON or dump a tree view through the same registry.
//!
//! Architecture
//!
//!     .
//!     ├── error.rs
//!     ├── codec.rs                # encode / decode facade
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── markdown
//!     │   │   ├── inline.rs       # Mark scanner and renderer
//!     │   │   ├── parser.rs       # Line state machine
//!     │   │   ├── serializer.rs   # Tree renderer
//!     │   │   └── mod.rs
//!     │   ├── json
//!     │   └── treeviz
//!     ├── lib.rs
//!     └── ir                      # Document tree, wire shape, validation
//!
//!     This is a pure lib: it powers folio-cli but makes no assumption about a shell
//!     environment (no printing, no env vars).
//!
//! Testing
//!     tests
//!     └── <format>
//!         ├── <testname>.rs
//!         └── fixtures
//!
//!     Rust does not discover tests in subdirectories by default, so tests/lib.rs mounts them.
//!
//! The Markdown Dialect
//!
//!     A deliberately small subset: ATX headings, `-`/`*` and `1.` list lines, `>` quotes,
//!     fenced code, `---` rules, whole-line images and the bold / italic / strike / code / link
//!     marks. It is not CommonMark. Anything outside the subset decodes as paragraph text, and
//!     some shapes do not survive a round trip (see ./formats/markdown/mod.rs for the list).
//!
pub mod codec;
pub mod error;
pub mod format;
pub mod formats;
pub mod ir;
pub mod registry;

pub use codec::{decode, encode, encode_value, EncodeInput};
pub use error::FormatError;
pub use format::Format;
pub use formats::markdown::serializer::SerializeOptions;
pub use ir::nodes::{DocumentNode, Mark};
pub use ir::validate::{validate, ValidationError, ViolationKind};
pub use registry::FormatRegistry;
