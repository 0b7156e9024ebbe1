//! Layout-aware printing of the TypeScript syntax tree.

mod helpers;
mod printed;

pub use helpers::{
    INLINE_LIST_MAX_WIDTH, ListLayout, escape_template_string, print_list, quote_string,
    wrap_in_block,
};
pub use printed::PrintedCode;

use super::ast::*;
use crate::utils::is_identifier;

/// Prints a whole program, ending with a newline.
pub fn print_program(program: &Program) -> String {
    Printer::new().program(program).to_string()
}

#[derive(Debug)]
pub struct Printer {
    line_breaks_allowed: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            line_breaks_allowed: true,
        }
    }

    fn list_layout(&self) -> ListLayout {
        if self.line_breaks_allowed {
            ListLayout::Auto
        } else {
            ListLayout::Inline
        }
    }

    pub fn program(&mut self, program: &Program) -> PrintedCode {
        let mut blocks: Vec<_> = program.comments.iter().map(|c| self.comment(c)).collect();
        for statement in &program.body {
            blocks.push(self.statement(statement));
        }
        blocks.push(PrintedCode::new(""));
        PrintedCode::join(blocks)
    }

    pub fn comment(&self, comment: &Comment) -> PrintedCode {
        let Comment::Block(value) = comment;
        let mut lines = value.split('\n');
        let first = lines.next().unwrap_or_default();
        let rest: Vec<String> = lines.map(|line| format!(" * {}", line)).collect();
        if rest.is_empty() {
            return PrintedCode::new(format!("/* {} */", first));
        }
        let mut code = PrintedCode::new(format!("/* {}", first));
        code.append(PrintedCode::from_lines(rest));
        code.append(PrintedCode::new(" */"));
        code
    }

    // ============================================================
    // Statements
    // ============================================================

    pub fn statement(&mut self, statement: &Statement) -> PrintedCode {
        match statement {
            Statement::Import(import) => self.import(import),
            Statement::Expression(expression) => {
                let mut code = self.expression(expression);
                code.push_str(";");
                code
            }
            Statement::Return(None) => PrintedCode::new("return;"),
            Statement::Return(Some(argument)) => PrintedCode::join_inline([
                PrintedCode::new("return "),
                self.expression(argument),
                PrintedCode::new(";"),
            ]),
            Statement::ExportDefault(Exported::Declaration(declaration)) => {
                let mut code = self.declaration(declaration);
                code.prepend_inline(PrintedCode::new("export default "));
                code
            }
            Statement::ExportDefault(Exported::Expression(expression)) => {
                PrintedCode::join_inline([
                    PrintedCode::new("export default "),
                    self.expression(expression),
                    PrintedCode::new(";"),
                ])
            }
            Statement::ExportNamed(declaration) => {
                let mut code = self.declaration(declaration);
                code.prepend_inline(PrintedCode::new("export "));
                code
            }
            Statement::Declaration(declaration) => self.declaration(declaration),
        }
    }

    fn import(&self, import: &ImportDeclaration) -> PrintedCode {
        let specifiers = match import.specifiers.as_slice() {
            [ImportSpecifier::Default(local)] => local.clone(),
            specifiers => {
                let list: Vec<String> = specifiers
                    .iter()
                    .map(|specifier| match specifier {
                        ImportSpecifier::Named {
                            imported,
                            local: Some(local),
                        } if local != imported => format!("{} as {}", imported, local),
                        ImportSpecifier::Named { imported, .. } => imported.clone(),
                        ImportSpecifier::Default(local) => format!("default as {}", local),
                    })
                    .collect();
                format!("{{ {} }}", list.join(", "))
            }
        };
        PrintedCode::new(format!(
            "import {} from {};",
            specifiers,
            quote_string(&import.source)
        ))
    }

    fn block(&mut self, statements: &[Statement]) -> PrintedCode {
        let content = PrintedCode::join(statements.iter().map(|s| self.statement(s)));
        wrap_in_block(content)
    }

    // ============================================================
    // Declarations
    // ============================================================

    pub fn declaration(&mut self, declaration: &Declaration) -> PrintedCode {
        match declaration {
            Declaration::Class(class) => self.class(class),
            Declaration::Interface(interface) => self.interface(interface),
            Declaration::Const { name, value } => PrintedCode::join_inline([
                PrintedCode::new(format!("const {} = ", name)),
                self.expression(value),
                PrintedCode::new(";"),
            ]),
        }
    }

    fn class(&mut self, class: &ClassDeclaration) -> PrintedCode {
        let mut head = format!("class {} ", class.id);
        if !class.implements.is_empty() {
            head.push_str(&format!("implements {} ", class.implements.join(", ")));
        }
        let members = PrintedCode::join(class.body.iter().map(|member| match member {
            ClassMember::Property(property) => self.property_definition(property),
            ClassMember::Method(method) => self.method(method),
        }));
        PrintedCode::join_inline([PrintedCode::new(head), wrap_in_block(members)])
    }

    fn property_definition(&self, property: &PropertyDefinition) -> PrintedCode {
        PrintedCode::new(format!(
            "private {}{};",
            property_key(&property.key),
            type_annotation(property.type_annotation.as_ref())
        ))
    }

    fn method(&mut self, method: &MethodDefinition) -> PrintedCode {
        let modifier = match method.kind {
            MethodKind::Get => "get ",
            MethodKind::Constructor | MethodKind::Method => "",
        };
        let head = format!(
            "public {}{}({}){} ",
            modifier,
            property_key(&method.key),
            parameters(&method.params),
            type_annotation(method.return_type.as_ref())
        );
        PrintedCode::join_inline([PrintedCode::new(head), self.block(&method.body)])
    }

    fn interface(&self, interface: &InterfaceDeclaration) -> PrintedCode {
        let members = PrintedCode::join(interface.body.iter().map(|signature| {
            let modifier = match signature.kind {
                MethodKind::Get => "get ",
                MethodKind::Constructor | MethodKind::Method => "",
            };
            PrintedCode::new(format!(
                "{}{}({}){};",
                modifier,
                property_key(&signature.key),
                parameters(&signature.params),
                type_annotation(signature.return_type.as_ref())
            ))
        }));
        PrintedCode::join_inline([
            PrintedCode::new(format!("interface {} ", interface.id)),
            wrap_in_block(members),
        ])
    }

    // ============================================================
    // Expressions
    // ============================================================

    pub fn expression(&mut self, expression: &Expression) -> PrintedCode {
        match expression {
            Expression::Identifier(name) => PrintedCode::new(name.as_str()),
            Expression::Literal(value) => PrintedCode::new(quote_string(value)),
            Expression::This => PrintedCode::new("this"),
            Expression::Member { object, property } => {
                let mut code = self.expression(object);
                code.push_str(&format!(".{}", property));
                code
            }
            Expression::Call { callee, arguments } => {
                let mut code = self.expression(callee);
                code.append_inline(self.arguments(arguments));
                code
            }
            Expression::Template(template) => self.template(template),
            Expression::Arrow { params, body } => {
                let mut code = PrintedCode::new(format!("({}) => ", parameters(params)));
                code.append_inline(self.expression(body));
                code
            }
            Expression::Assignment { left, right } => {
                let mut code = self.expression(left);
                code.push_str(" = ");
                code.append_inline(self.expression(right));
                code
            }
            Expression::Object(properties) => {
                let items = properties
                    .iter()
                    .map(|property| {
                        let mut item =
                            PrintedCode::new(format!("{}: ", property_key(&property.key)));
                        item.append_inline(self.expression(&property.value));
                        item
                    })
                    .collect();
                print_list("{", items, "}", self.list_layout())
            }
            Expression::Array(elements) => {
                let items = elements.iter().map(|e| self.expression(e)).collect();
                print_list("[", items, "]", self.list_layout())
            }
            Expression::New {
                callee,
                type_arguments,
                arguments,
            } => {
                let mut head = format!("new {}", callee);
                if !type_arguments.is_empty() {
                    let types: Vec<String> = type_arguments.iter().map(type_node).collect();
                    head.push_str(&format!("<{}>", types.join(", ")));
                }
                let mut code = PrintedCode::new(head);
                code.append_inline(self.arguments(arguments));
                code
            }
            Expression::DynamicImport(source) => {
                PrintedCode::new(format!("import({})", quote_string(source)))
            }
        }
    }

    fn arguments(&mut self, arguments: &[Expression]) -> PrintedCode {
        let mut code = PrintedCode::new("(");
        for (i, argument) in arguments.iter().enumerate() {
            if i > 0 {
                code.push_str(", ");
            }
            code.append_inline(self.expression(argument));
        }
        code.push_str(")");
        code
    }

    fn template(&mut self, template: &TemplateLiteral) -> PrintedCode {
        let previous = self.line_breaks_allowed;
        self.line_breaks_allowed = false;

        let mut code = PrintedCode::new("`");
        let mut quasis = template.quasis.iter();
        for expression in &template.expressions {
            if let Some(quasi) = quasis.next() {
                code.push_str(&escape_template_string(quasi));
            }
            code.push_str("${");
            code.append_inline(self.expression(expression));
            code.push_str("}");
        }
        for quasi in quasis {
            code.push_str(&escape_template_string(quasi));
        }
        code.push_str("`");

        self.line_breaks_allowed = previous;
        code
    }
}

fn property_key(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        quote_string(key)
    }
}

fn parameters(params: &[Parameter]) -> String {
    params
        .iter()
        .map(|param| {
            format!(
                "{}{}",
                param.name,
                type_annotation(param.type_annotation.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn type_annotation(node: Option<&TypeNode>) -> String {
    node.map(|node| format!(": {}", type_node(node)))
        .unwrap_or_default()
}

fn type_node(node: &TypeNode) -> String {
    match node {
        TypeNode::Any => "any".to_string(),
        TypeNode::String => "string".to_string(),
        TypeNode::Number => "number".to_string(),
        TypeNode::Array(element) => format!("{}[]", type_node(element)),
        TypeNode::Reference(name) => name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeHint;
    use pretty_assertions::assert_eq;

    fn print_statement(statement: &Statement) -> String {
        Printer::new().statement(statement).to_string()
    }

    fn print_expression(expression: &Expression) -> String {
        Printer::new().expression(expression).to_string()
    }

    #[test]
    fn test_block_comments() {
        let printer = Printer::new();
        assert_eq!(
            printer.comment(&block_comment("one line")).to_string(),
            "/* one line */"
        );
        assert_eq!(
            printer
                .comment(&block_comment("Generated from:\na.tm\nb.tm"))
                .to_string(),
            "/* Generated from:\n * a.tm\n * b.tm\n */"
        );
    }

    #[test]
    fn test_imports() {
        assert_eq!(
            print_statement(&import("elzii", &["Fmt"])),
            "import { Fmt } from 'elzii';"
        );
        assert_eq!(
            print_statement(&import_default("./en_Locale", "en_Locale")),
            "import en_Locale from './en_Locale';"
        );
        let aliased = Statement::Import(ImportDeclaration {
            specifiers: vec![
                ImportSpecifier::Named {
                    imported: "A".into(),
                    local: None,
                },
                ImportSpecifier::Named {
                    imported: "B".into(),
                    local: Some("C".into()),
                },
            ],
            source: ".".into(),
        });
        assert_eq!(print_statement(&aliased), "import { A, B as C } from '.';");
    }

    #[test]
    fn test_template_literal() {
        let expression = template(
            vec!["Hello ".into(), ", `you` owe ${".into(), "".into()],
            vec![identifier("name"), identifier("amount")],
        );
        assert_eq!(
            print_expression(&expression),
            "`Hello ${name}, \\`you\\` owe \\${${amount}`"
        );
    }

    #[test]
    fn test_template_keeps_nested_lists_inline() {
        let long_object = object(vec![
            ("style", literal("currency".repeat(4))),
            ("currency", literal("EUR".repeat(10))),
        ]);
        let expression = template(
            vec!["".into(), "".into()],
            vec![call(identifier("format"), vec![long_object.clone()])],
        );
        let mut printer = Printer::new();
        assert_eq!(printer.expression(&expression).line_count(), 1);
        assert!(printer.line_breaks_allowed);
        assert_eq!(printer.expression(&long_object).line_count(), 4);
    }

    #[test]
    fn test_call_and_arrow() {
        let expression = call(
            member(member(Expression::This, "fmt"), "format"),
            vec![
                identifier("count"),
                arrow(vec![parameter("$f", None)], identifier("$f.number")),
                literal("fmt0badf00d"),
            ],
        );
        assert_eq!(
            print_expression(&expression),
            "this.fmt.format(count, ($f) => $f.number, 'fmt0badf00d')"
        );
    }

    #[test]
    fn test_class_with_getter_and_method() {
        let class = Declaration::Class(ClassDeclaration {
            id: "en_Locale".into(),
            implements: vec!["Locale".into()],
            body: vec![
                ClassMember::Property(PropertyDefinition {
                    key: "fmt".into(),
                    type_annotation: Some(type_reference("Fmt")),
                }),
                ClassMember::Method(constructor(
                    vec![parameter("fmt", Some(type_reference("Fmt")))],
                    vec![Statement::Expression(assignment(
                        member(Expression::This, "fmt"),
                        identifier("fmt"),
                    ))],
                )),
                ClassMember::Method(message_method(
                    "title",
                    vec![],
                    vec![Statement::Return(Some(literal("<title>")))],
                )),
                ClassMember::Method(message_method(
                    "hello",
                    vec![parameter("name", Some(TypeNode::Any))],
                    vec![Statement::Return(Some(template(
                        vec!["Hello ".into(), "".into()],
                        vec![identifier("name")],
                    )))],
                )),
            ],
        });
        assert_eq!(
            print_statement(&Statement::ExportDefault(Exported::Declaration(class))),
            "export default class en_Locale implements Locale {\n\
            \x20 private fmt: Fmt;\n\
            \x20 public constructor(fmt: Fmt) {\n\
            \x20   this.fmt = fmt;\n\
            \x20 }\n\
            \x20 public get title(): string {\n\
            \x20   return '<title>';\n\
            \x20 }\n\
            \x20 public hello(name: any): string {\n\
            \x20   return `Hello ${name}`;\n\
            \x20 }\n\
            }"
        );
    }

    #[test]
    fn test_interface() {
        let interface = Declaration::Interface(InterfaceDeclaration {
            id: "Locale".into(),
            body: vec![
                message_signature("title", vec![]),
                message_signature(
                    "items",
                    vec![parameter("list", Some(TypeHint::List.into()))],
                ),
            ],
        });
        assert_eq!(
            print_statement(&Statement::ExportNamed(interface)),
            "export interface Locale {\n  get title(): string;\n  items(list: any[]): string;\n}"
        );
    }

    #[test]
    fn test_empty_interface() {
        let interface = Declaration::Interface(InterfaceDeclaration {
            id: "Locale".into(),
            body: vec![],
        });
        assert_eq!(
            print_statement(&Statement::ExportNamed(interface)),
            "export interface Locale { }"
        );
    }

    #[test]
    fn test_non_identifier_keys_are_quoted() {
        let expression = object(vec![("en-UK", literal("x")), ("id", literal("y"))]);
        assert_eq!(print_expression(&expression), "{ 'en-UK': 'x', id: 'y' }");
    }

    #[test]
    fn test_const_with_multiline_new_expression() {
        let value = Expression::New {
            callee: "Elz".into(),
            type_arguments: vec![type_reference("Locale")],
            arguments: vec![object(vec![
                (
                    "locales",
                    Expression::Array(vec![
                        object(vec![("id", literal("en"))]),
                        object(vec![("id", literal("fr"))]),
                    ]),
                ),
                ("default", literal("en")),
            ])],
        };
        let statement = Statement::ExportNamed(Declaration::Const {
            name: "elz".into(),
            value,
        });
        assert_eq!(
            print_statement(&statement),
            "export const elz = new Elz<Locale>({ locales: [{ id: 'en' }, { id: 'fr' }], default: 'en' });"
        );
    }

    #[test]
    fn test_program_ends_with_newline() {
        let program = Program {
            comments: vec![block_comment("x")],
            body: vec![import("elzii", &["Fmt"])],
        };
        assert_eq!(
            print_program(&program),
            "/* x */\nimport { Fmt } from 'elzii';\n"
        );
    }
}
