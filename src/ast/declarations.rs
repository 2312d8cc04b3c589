use crate::Span;

use super::{
    ast::{impl_display_via_node, indent, Node},
    expressions::Identifier,
    statements::{BlockStatement, LetStatement},
    types::TypeAnnotation,
};

/// `name` or `name (Type)`
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: Identifier,
    pub type_annotation: Option<TypeAnnotation>,
    pub span: Span,
}

impl Node for Parameter {
    fn token_literal(&self) -> String {
        self.name.value.clone()
    }
    fn to_string_indent(&self, _level: usize) -> String {
        match &self.type_annotation {
            Some(type_annotation) => format!("{} ({})", self.name.value, type_annotation),
            None => self.name.value.clone(),
        }
    }
    fn span(&self) -> Span {
        self.span
    }
}

pub(crate) fn render_parameters(parameters: &[Parameter]) -> String {
    parameters
        .iter()
        .map(|p| p.to_string_indent(0))
        .collect::<Vec<String>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDefinition {
    pub name: Identifier,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeAnnotation>,
    pub body: BlockStatement,
    pub span: Span,
}

impl Node for FunctionDefinition {
    fn token_literal(&self) -> String {
        self.name.value.clone()
    }
    fn to_string_indent(&self, level: usize) -> String {
        let return_type = match &self.return_type {
            Some(return_type) => format!("{} ", return_type),
            None => String::new(),
        };

        format!(
            "{}({}) -> {}{}",
            self.name.value,
            render_parameters(&self.parameters),
            return_type,
            self.body.to_string_indent(level)
        )
    }
    fn span(&self) -> Span {
        self.span
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassStyle {
    /// `Name -> { ... }`
    Arrow,
    /// `type Name { ... }`
    Brace,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassMember {
    Field(LetStatement),
    Method(FunctionDefinition),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDeclaration {
    pub name: Identifier,
    pub style: ClassStyle,
    pub members: Vec<ClassMember>,
    pub span: Span,
}

impl ClassDeclaration {
    pub fn fields(&self) -> impl Iterator<Item = &LetStatement> {
        self.members.iter().filter_map(|member| match member {
            ClassMember::Field(field) => Some(field),
            ClassMember::Method(_) => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &FunctionDefinition> {
        self.members.iter().filter_map(|member| match member {
            ClassMember::Method(method) => Some(method),
            ClassMember::Field(_) => None,
        })
    }
}

impl Node for ClassDeclaration {
    fn token_literal(&self) -> String {
        match self.style {
            ClassStyle::Arrow => self.name.value.clone(),
            ClassStyle::Brace => String::from("type"),
        }
    }
    fn to_string_indent(&self, level: usize) -> String {
        let header = match self.style {
            ClassStyle::Arrow => format!("{} ->", self.name.value),
            ClassStyle::Brace => format!("type {}", self.name.value),
        };

        if self.members.is_empty() {
            return format!("{} {{}}", header);
        }

        let mut out = format!("{} {{\n", header);
        for member in &self.members {
            let rendered = match member {
                ClassMember::Field(field) => format!("{};", field.render_field(level + 1)),
                ClassMember::Method(method) => method.to_string_indent(level + 1),
            };
            out.push_str(&format!("{}{}\n", indent(level + 1), rendered));
        }
        out.push_str(&format!("{}}}", indent(level)));

        out
    }
    fn span(&self) -> Span {
        self.span
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataStyle {
    /// `Point = (x, y)`
    Tuple,
    /// `Point = { x: int, y: int }`
    Record,
}

/// A field of a data structure. Tuple-style fields may omit the type.
#[derive(Debug, Clone, PartialEq)]
pub struct DataField {
    pub name: Identifier,
    pub type_annotation: Option<TypeAnnotation>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataStructure {
    pub name: Identifier,
    pub style: DataStyle,
    pub fields: Vec<DataField>,
    pub span: Span,
}

impl Node for DataStructure {
    fn token_literal(&self) -> String {
        self.name.value.clone()
    }
    fn to_string_indent(&self, level: usize) -> String {
        match self.style {
            DataStyle::Tuple => {
                let fields = self
                    .fields
                    .iter()
                    .map(|field| match &field.type_annotation {
                        Some(type_annotation) => {
                            format!("{} ({})", field.name.value, type_annotation)
                        }
                        None => field.name.value.clone(),
                    })
                    .collect::<Vec<String>>()
                    .join(", ");

                format!("{} = ({});", self.name.value, fields)
            }
            DataStyle::Record => {
                if self.fields.is_empty() {
                    return format!("{} = {{}};", self.name.value);
                }

                let fields = self
                    .fields
                    .iter()
                    .map(|field| {
                        let type_annotation = field
                            .type_annotation
                            .as_ref()
                            .map(|t| t.to_string())
                            .unwrap_or_default();
                        format!("{}{}: {}", indent(level + 1), field.name.value, type_annotation)
                    })
                    .collect::<Vec<String>>()
                    .join(",\n");

                format!("{} = {{\n{}\n{}}};", self.name.value, fields, indent(level))
            }
        }
    }
    fn span(&self) -> Span {
        self.span
    }
}

impl_display_via_node!(Parameter, FunctionDefinition, ClassDeclaration, DataStructure);
