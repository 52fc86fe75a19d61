//! In-memory code model accumulated during a walk.
//!
//! The model is built once per run and only materialized after every
//! resource root has been walked, so a failure anywhere leaves the output
//! directory untouched.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{GenError, GenResult};
use crate::naming::{escape_javadoc, PackagePath};

/// Marker interface every generated taglib interface extends.
pub const TYPED_TAG_LIBRARY: &str = "org.kohsuke.stapler.jelly.groovy.TypedTagLibrary";

/// Annotation carrying the taglib URI.
pub const TAG_LIBRARY_URI: &str = "org.kohsuke.stapler.jelly.groovy.TagLibraryUri";

/// Type of the named-arguments parameter.
pub const ARGS_TYPE: &str = "java.util.Map";

/// Type of the body-block parameter.
pub const BODY_TYPE: &str = "groovy.lang.Closure";

/// One parameter shape of a tag method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Overload {
    /// Takes a `Map args` parameter.
    pub args: bool,
    /// Takes a `Closure body` parameter.
    pub body: bool,
}

/// The four overloads generated for every tag, in declaration order.
pub const OVERLOADS: [Overload; 4] = [
    Overload { args: true, body: true },
    Overload { args: false, body: true },
    Overload { args: true, body: false },
    Overload { args: false, body: false },
];

/// A method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    /// Fully qualified type name.
    pub type_name: String,
    pub name: String,
}

impl Param {
    /// Simple (unqualified) type name for use after imports.
    pub fn simple_type(&self) -> &str {
        self.type_name.rsplit('.').next().unwrap_or(&self.type_name)
    }
}

/// A `void` method declared on a generated interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedMethod {
    pub name: String,
    pub params: Vec<Param>,
    /// Escaped documentation, ready for a Javadoc block.
    pub javadoc: Option<String>,
}

impl GeneratedMethod {
    /// Build the method for one overload shape.
    pub fn new(name: &str, overload: Overload, documentation: Option<&str>) -> Self {
        let mut params = Vec::with_capacity(2);
        if overload.args {
            params.push(Param {
                type_name: ARGS_TYPE.to_string(),
                name: "args".to_string(),
            });
        }
        if overload.body {
            params.push(Param {
                type_name: BODY_TYPE.to_string(),
                name: "body".to_string(),
            });
        }
        Self {
            name: name.to_string(),
            params,
            javadoc: documentation.map(escape_javadoc),
        }
    }

    /// The overload shape this method was built from.
    pub fn overload(&self) -> Overload {
        Overload {
            args: self.params.iter().any(|p| p.name == "args"),
            body: self.params.iter().any(|p| p.name == "body"),
        }
    }
}

/// A generated interface for one taglib directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedInterface {
    /// Package the interface is declared in.
    pub package: PackagePath,
    pub name: String,
    /// Value of the `TagLibraryUri` annotation.
    pub uri: String,
    /// Interfaces this one extends.
    pub extends: Vec<String>,
    pub methods: Vec<GeneratedMethod>,
}

impl GeneratedInterface {
    pub fn fqn(&self) -> String {
        self.package.qualify(&self.name)
    }

    /// Declare all four overloads of a tag method.
    pub fn add_tag(&mut self, method_name: &str, documentation: Option<&str>) {
        for overload in OVERLOADS {
            self.methods
                .push(GeneratedMethod::new(method_name, overload, documentation));
        }
    }

    /// Number of distinct tags declared on this interface.
    pub fn tag_count(&self) -> usize {
        self.methods.len() / OVERLOADS.len()
    }
}

/// All interfaces produced by one run, keyed by fully qualified name.
#[derive(Debug, Default)]
pub struct OutputModel {
    interfaces: BTreeMap<String, GeneratedInterface>,
}

impl OutputModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a new interface extending the typed-taglib marker.
    ///
    /// Fails if an interface with the same fully qualified name exists.
    pub fn declare_interface(
        &mut self,
        package: PackagePath,
        name: String,
        uri: String,
    ) -> GenResult<&mut GeneratedInterface> {
        let interface = GeneratedInterface {
            package,
            name,
            uri,
            extends: vec![TYPED_TAG_LIBRARY.to_string()],
            methods: Vec::new(),
        };
        let fqn = interface.fqn();
        match self.interfaces.entry(fqn) {
            Entry::Occupied(existing) => Err(GenError::DuplicateInterface {
                existing: existing.get().fqn(),
            }),
            Entry::Vacant(slot) => Ok(slot.insert(interface)),
        }
    }

    pub fn get(&self, fqn: &str) -> Option<&GeneratedInterface> {
        self.interfaces.get(fqn)
    }

    /// Interfaces in fully qualified name order.
    pub fn interfaces(&self) -> impl Iterator<Item = &GeneratedInterface> {
        self.interfaces.values()
    }

    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }
}
