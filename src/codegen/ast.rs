//! A minimal TypeScript syntax tree.
//!
//! It covers exactly the shapes the generated modules use. Nodes are built
//! with the free functions at the bottom of this file and rendered by
//! [`crate::codegen::printer`].

use crate::model::TypeHint;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub comments: Vec<Comment>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comment {
    Block(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Import(ImportDeclaration),
    Expression(Expression),
    Return(Option<Expression>),
    ExportDefault(Exported),
    ExportNamed(Declaration),
    Declaration(Declaration),
}

/// What an `export default` statement exports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exported {
    Declaration(Declaration),
    Expression(Expression),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDeclaration {
    pub specifiers: Vec<ImportSpecifier>,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportSpecifier {
    Named {
        imported: String,
        local: Option<String>,
    },
    Default(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Class(ClassDeclaration),
    Interface(InterfaceDeclaration),
    Const { name: String, value: Expression },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDeclaration {
    pub id: String,
    pub implements: Vec<String>,
    pub body: Vec<ClassMember>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassMember {
    Property(PropertyDefinition),
    Method(MethodDefinition),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDefinition {
    pub key: String,
    pub type_annotation: Option<TypeNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Constructor,
    Get,
    Method,
}

impl MethodKind {
    /// Messages without parameters become getters.
    pub fn for_params(params: &[Parameter]) -> Self {
        if params.is_empty() {
            MethodKind::Get
        } else {
            MethodKind::Method
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDefinition {
    pub key: String,
    pub kind: MethodKind,
    pub params: Vec<Parameter>,
    pub return_type: Option<TypeNode>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub type_annotation: Option<TypeNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDeclaration {
    pub id: String,
    pub body: Vec<MethodSignature>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub key: String,
    pub kind: MethodKind,
    pub params: Vec<Parameter>,
    pub return_type: Option<TypeNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Identifier(String),
    /// A string literal.
    Literal(String),
    This,
    Member {
        object: Box<Expression>,
        property: String,
    },
    Call {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },
    Template(TemplateLiteral),
    Arrow {
        params: Vec<Parameter>,
        body: Box<Expression>,
    },
    Assignment {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Object(Vec<Property>),
    Array(Vec<Expression>),
    New {
        callee: String,
        type_arguments: Vec<TypeNode>,
        arguments: Vec<Expression>,
    },
    DynamicImport(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub key: String,
    pub value: Expression,
}

/// A template literal. There is always one more quasi than expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLiteral {
    pub quasis: Vec<String>,
    pub expressions: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeNode {
    Any,
    String,
    Number,
    Array(Box<TypeNode>),
    Reference(String),
}

impl From<TypeHint> for TypeNode {
    fn from(hint: TypeHint) -> Self {
        match hint {
            TypeHint::None | TypeHint::Mixed => TypeNode::Any,
            TypeHint::String => TypeNode::String,
            TypeHint::Number => TypeNode::Number,
            TypeHint::List => TypeNode::Array(Box::new(TypeNode::Any)),
            TypeHint::Datetime => TypeNode::Reference("Date".to_string()),
        }
    }
}

// ============================================================
// Builders
// ============================================================

pub fn block_comment(value: impl Into<String>) -> Comment {
    Comment::Block(value.into())
}

pub fn import(source: impl Into<String>, names: &[&str]) -> Statement {
    Statement::Import(ImportDeclaration {
        specifiers: names
            .iter()
            .map(|name| ImportSpecifier::Named {
                imported: name.to_string(),
                local: None,
            })
            .collect(),
        source: source.into(),
    })
}

pub fn import_default(source: impl Into<String>, local: impl Into<String>) -> Statement {
    Statement::Import(ImportDeclaration {
        specifiers: vec![ImportSpecifier::Default(local.into())],
        source: source.into(),
    })
}

pub fn identifier(name: impl Into<String>) -> Expression {
    Expression::Identifier(name.into())
}

pub fn literal(value: impl Into<String>) -> Expression {
    Expression::Literal(value.into())
}

pub fn member(object: Expression, property: impl Into<String>) -> Expression {
    Expression::Member {
        object: Box::new(object),
        property: property.into(),
    }
}

pub fn call(callee: Expression, arguments: Vec<Expression>) -> Expression {
    Expression::Call {
        callee: Box::new(callee),
        arguments,
    }
}

pub fn arrow(params: Vec<Parameter>, body: Expression) -> Expression {
    Expression::Arrow {
        params,
        body: Box::new(body),
    }
}

pub fn assignment(left: Expression, right: Expression) -> Expression {
    Expression::Assignment {
        left: Box::new(left),
        right: Box::new(right),
    }
}

pub fn object(properties: Vec<(&str, Expression)>) -> Expression {
    Expression::Object(
        properties
            .into_iter()
            .map(|(key, value)| Property {
                key: key.to_string(),
                value,
            })
            .collect(),
    )
}

pub fn template(quasis: Vec<String>, expressions: Vec<Expression>) -> Expression {
    debug_assert_eq!(quasis.len(), expressions.len() + 1);
    Expression::Template(TemplateLiteral {
        quasis,
        expressions,
    })
}

pub fn parameter(name: impl Into<String>, type_annotation: Option<TypeNode>) -> Parameter {
    Parameter {
        name: name.into(),
        type_annotation,
    }
}

pub fn type_reference(name: impl Into<String>) -> TypeNode {
    TypeNode::Reference(name.into())
}

/// A getter or a method, depending on the number of parameters.
pub fn message_method(
    key: impl Into<String>,
    params: Vec<Parameter>,
    body: Vec<Statement>,
) -> MethodDefinition {
    MethodDefinition {
        key: key.into(),
        kind: MethodKind::for_params(&params),
        params,
        return_type: Some(TypeNode::String),
        body,
    }
}

pub fn message_signature(key: impl Into<String>, params: Vec<Parameter>) -> MethodSignature {
    MethodSignature {
        key: key.into(),
        kind: MethodKind::for_params(&params),
        params,
        return_type: Some(TypeNode::String),
    }
}

pub fn constructor(params: Vec<Parameter>, body: Vec<Statement>) -> MethodDefinition {
    MethodDefinition {
        key: "constructor".to_string(),
        kind: MethodKind::Constructor,
        params,
        return_type: None,
        body,
    }
}
