//! Declaration specs for generated Java files.

use std::fmt::{self, Write as _};
use std::path::PathBuf;

use crate::models::TypeRef;

use super::ImportScope;

const INDENT: &str = "  ";

/// The value of an annotation member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationMember {
    /// `{A.class, B.class}`
    Classes(Vec<TypeRef>),
    /// `RetentionPolicy.RUNTIME`
    EnumConstant(TypeRef, String),
}

/// An annotation applied to a generated type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationSpec {
    pub ty: TypeRef,
    pub members: Vec<(String, AnnotationMember)>,
}

impl AnnotationSpec {
    /// A marker annotation without members.
    pub fn marker(ty: TypeRef) -> Self {
        Self {
            ty,
            members: Vec::new(),
        }
    }

    pub fn with_member(mut self, name: impl Into<String>, value: AnnotationMember) -> Self {
        self.members.push((name.into(), value));
        self
    }

    /// Returns the member with the given name.
    pub fn member(&self, name: &str) -> Option<&AnnotationMember> {
        self.members
            .iter()
            .find(|(member, _)| member == name)
            .map(|(_, value)| value)
    }

    fn referenced_types<'a>(&'a self, out: &mut Vec<&'a TypeRef>) {
        out.push(&self.ty);
        for (_, value) in &self.members {
            match value {
                AnnotationMember::Classes(types) => out.extend(types.iter()),
                AnnotationMember::EnumConstant(ty, _) => out.push(ty),
            }
        }
    }

    fn render(&self, imports: &ImportScope, out: &mut String) -> fmt::Result {
        write!(out, "@{}", imports.name(&self.ty))?;
        if self.members.is_empty() {
            return Ok(());
        }

        out.push('(');
        // A lone `value` member uses the shorthand form.
        let shorthand = self.members.len() == 1 && self.members[0].0 == "value";
        for (i, (name, value)) in self.members.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            if !shorthand {
                write!(out, "{} = ", name)?;
            }
            match value {
                AnnotationMember::Classes(types) => {
                    let classes: Vec<String> = types
                        .iter()
                        .map(|ty| format!("{}.class", imports.name(ty)))
                        .collect();
                    write!(out, "{{{}}}", classes.join(", "))?;
                }
                AnnotationMember::EnumConstant(ty, constant) => {
                    write!(out, "{}.{}", imports.name(ty), constant)?;
                }
            }
        }
        out.push(')');
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub ty: TypeRef,
    pub name: String,
}

/// An abstract method of a generated interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSpec {
    pub name: String,
    pub returns: TypeRef,
    pub params: Vec<ParameterSpec>,
}

impl MethodSpec {
    pub fn new(name: impl Into<String>, returns: TypeRef) -> Self {
        Self {
            name: name.into(),
            returns,
            params: Vec::new(),
        }
    }

    pub fn with_param(mut self, ty: TypeRef, name: impl Into<String>) -> Self {
        self.params.push(ParameterSpec {
            ty,
            name: name.into(),
        });
        self
    }

    fn render(&self, imports: &ImportScope, out: &mut String) -> fmt::Result {
        let params: Vec<String> = self
            .params
            .iter()
            .map(|p| format!("{} {}", imports.name(&p.ty), p.name))
            .collect();
        writeln!(
            out,
            "{}{} {}({});",
            INDENT,
            imports.name(&self.returns),
            self.name,
            params.join(", ")
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Interface,
    Annotation,
}

/// A public top-level type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub kind: TypeKind,
    pub name: String,
    pub annotations: Vec<AnnotationSpec>,
    pub methods: Vec<MethodSpec>,
}

impl TypeSpec {
    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Interface,
            name: name.into(),
            annotations: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn annotation(name: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Annotation,
            name: name.into(),
            annotations: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn with_annotation(mut self, annotation: AnnotationSpec) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_method(mut self, method: MethodSpec) -> Self {
        self.methods.push(method);
        self
    }
}

/// One generated compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaFile {
    pub package: String,
    pub type_spec: TypeSpec,
    pub file_comment: String,
}

impl JavaFile {
    pub fn new(package: impl Into<String>, type_spec: TypeSpec) -> Self {
        Self {
            package: package.into(),
            type_spec,
            file_comment: String::new(),
        }
    }

    pub fn with_file_comment(mut self, comment: impl Into<String>) -> Self {
        self.file_comment = comment.into();
        self
    }

    /// The declared type.
    pub fn type_ref(&self) -> TypeRef {
        TypeRef::new(self.package.clone(), self.type_spec.name.clone())
    }

    /// Path relative to the output root: `com/example/Foo.java`.
    pub fn relative_path(&self) -> PathBuf {
        let mut path: PathBuf = self
            .package
            .split('.')
            .filter(|segment| !segment.is_empty())
            .collect();
        path.push(format!("{}.java", self.type_spec.name));
        path
    }

    /// Renders the compilation unit.
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn import_scope(&self) -> ImportScope {
        let mut referenced = Vec::new();
        for annotation in &self.type_spec.annotations {
            annotation.referenced_types(&mut referenced);
        }
        for method in &self.type_spec.methods {
            referenced.push(&method.returns);
            referenced.extend(method.params.iter().map(|p| &p.ty));
        }
        ImportScope::new(&self.type_ref(), referenced)
    }
}

impl fmt::Display for JavaFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let imports = self.import_scope();
        let mut out = String::new();

        for line in self.file_comment.lines() {
            writeln!(out, "// {}", line)?;
        }
        if !self.package.is_empty() {
            writeln!(out, "package {};", self.package)?;
            out.push('\n');
        }

        let import_lines = imports.imports();
        if !import_lines.is_empty() {
            for import in import_lines {
                writeln!(out, "import {};", import)?;
            }
            out.push('\n');
        }

        for annotation in &self.type_spec.annotations {
            annotation.render(&imports, &mut out)?;
            out.push('\n');
        }

        let keyword = match self.type_spec.kind {
            TypeKind::Interface => "interface",
            TypeKind::Annotation => "@interface",
        };
        writeln!(out, "public {} {} {{", keyword, self.type_spec.name)?;
        for (i, method) in self.type_spec.methods.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            method.render(&imports, &mut out)?;
        }
        out.push_str("}\n");

        f.write_str(&out)
    }
}
