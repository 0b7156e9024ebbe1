//! Syntax tree pieces shared by the TypeScript targets.

use std::sync::{Mutex, PoisonError};

use crate::checks::AllReports;
use crate::codegen::ast::{self, *};
use crate::codegen::placeholders::{CacheKeyGenerator, UserCodeInsertion};
use crate::model::{
    FORMATTER_ACCESSOR, MessageParameter, MessagePart, ParameterFormat, Translation, UserCode,
};

pub const RUNTIME_MODULE: &str = "elzii";
pub const FORMATTER_CLASS: &str = "Fmt";
pub const FORMAT_METHOD: &str = "format";
pub const LOCALE_SELECTOR_CLASS: &str = "Elz";
pub const MAKE_PROXY_METHOD: &str = "makeLocaleProxy";
pub const FORMATTER_PROPERTY: &str = "fmt";
const CACHE_KEY_PREFIX: &str = "fmt";

pub fn generated_notice(tool: &str, sources: &[String]) -> Comment {
    let sources: String = sources.iter().map(|src| format!("\n{}", src)).collect();
    block_comment(format!(
        "Generated by {} from the following files:{}",
        tool, sources
    ))
}

fn message_parameters(reports: &AllReports, key: &str) -> Vec<Parameter> {
    reports
        .parameters
        .signature_of(key)
        .map(|signature| signature.parameters.iter().map(typed_parameter).collect())
        .unwrap_or_default()
}

fn typed_parameter(param: &MessageParameter) -> Parameter {
    parameter(param.name.as_str(), Some(param.type_hint.into()))
}

/// The interface every locale class implements: one member per key.
pub fn translation_interface(interface_name: &str, reports: &AllReports) -> Declaration {
    Declaration::Interface(InterfaceDeclaration {
        id: interface_name.to_string(),
        body: reports
            .missing
            .all_keys()
            .map(|key| message_signature(key.as_str(), message_parameters(reports, key)))
            .collect(),
    })
}

/// Builds the class of one translation.
///
/// User code is replaced by placeholders registered in `insertion`.
pub struct ClassBuilder<'a> {
    pub reports: &'a AllReports,
    pub insertion: &'a mut UserCodeInsertion,
    pub cache_keys: &'a Mutex<CacheKeyGenerator>,
}

impl ClassBuilder<'_> {
    pub fn placeholder(&mut self, code: UserCode) -> Expression {
        identifier(self.insertion.add_user_code(code))
    }

    pub fn translation_class(
        &mut self,
        translation: &Translation,
        class_name: &str,
        interface_name: &str,
    ) -> Declaration {
        let formatter_type = || Some(type_reference(FORMATTER_CLASS));
        let mut body = vec![
            ClassMember::Property(PropertyDefinition {
                key: FORMATTER_PROPERTY.to_string(),
                type_annotation: formatter_type(),
            }),
            ClassMember::Method(ast::constructor(
                vec![parameter(FORMATTER_PROPERTY, formatter_type())],
                vec![Statement::Expression(assignment(
                    member(Expression::This, FORMATTER_PROPERTY),
                    identifier(FORMATTER_PROPERTY),
                ))],
            )),
        ];

        let reports = self.reports;
        for key in reports.missing.all_keys() {
            let params = message_parameters(reports, key);
            let returned = match translation.public_message(key) {
                Some(message) => {
                    let context = format!("{}, {}", key, translation.id);
                    self.message_template(&message.content, &context)
                }
                None => template(vec![format!("<{}>", key)], vec![]),
            };
            body.push(ClassMember::Method(message_method(
                key.as_str(),
                params,
                vec![Statement::Return(Some(returned))],
            )));
        }

        Declaration::Class(ClassDeclaration {
            id: class_name.to_string(),
            implements: vec![interface_name.to_string()],
            body,
        })
    }

    fn message_template(&mut self, content: &[MessagePart], context: &str) -> Expression {
        let mut quasis = vec![String::new()];
        let mut expressions = Vec::new();

        for part in content {
            match part {
                MessagePart::Text(text) => {
                    if let Some(quasi) = quasis.last_mut() {
                        quasi.push_str(text);
                    }
                }
                MessagePart::Formatting { parameter, format } => {
                    expressions.push(self.format_expression(parameter, format.as_ref(), context));
                    quasis.push(String::new());
                }
                // Resolved before code generation
                MessagePart::Interpolation(_) => {}
            }
        }

        template(quasis, expressions)
    }

    fn format_expression(
        &mut self,
        parameter_name: &str,
        format: Option<&ParameterFormat>,
        context: &str,
    ) -> Expression {
        let value = identifier(parameter_name);
        match format {
            None => value,
            Some(ParameterFormat::Explicit(code)) => {
                call(self.placeholder(code.clone()), vec![value])
            }
            Some(ParameterFormat::Shorthand(code)) => {
                let spec = arrow(
                    vec![parameter(FORMATTER_ACCESSOR, None)],
                    self.placeholder(code.clone()),
                );
                let cache_key = self
                    .cache_keys
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .generate(CACHE_KEY_PREFIX);
                call(
                    member(member(Expression::This, FORMATTER_PROPERTY), FORMAT_METHOD),
                    vec![
                        value,
                        spec,
                        literal(cache_key),
                        literal(format!("parameter '{}' in {}", parameter_name, context)),
                    ],
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::run_checks;
    use crate::codegen::printer::Printer;
    use crate::core::extract::build_translation;
    use crate::core::parsers::tm::parse_tm;
    use pretty_assertions::assert_eq;

    fn translation(id: &str, source: &str) -> Translation {
        build_translation(id, parse_tm(source).unwrap().value).value
    }

    fn print_declaration(declaration: &Declaration) -> String {
        Printer::new().declaration(declaration).to_string()
    }

    #[test]
    fn test_generated_notice() {
        let Comment::Block(text) =
            generated_notice("elzii-tools 1.0.0", &["a/en.tm".into(), "a/fr.tm".into()]);
        assert_eq!(
            text,
            "Generated by elzii-tools 1.0.0 from the following files:\na/en.tm\na/fr.tm"
        );
    }

    #[test]
    fn test_interface_lists_all_keys_with_signatures() {
        let en = translation("en", "@default\ntitle = 'Home'\ncount = '{n:number} items'\n");
        let reports = run_checks([&en]).reports.unwrap();

        assert_eq!(
            print_declaration(&translation_interface("Locale", &reports)),
            "interface Locale {\n  count(n: number): string;\n  get title(): string;\n}"
        );
    }

    #[test]
    fn test_missing_key_returns_its_name() {
        let en = translation("en", "@default\ntitle = 'Home'\nhello = 'Hello {name}'\n");
        let fr = translation("fr", "title = 'Accueil'\n");
        let reports = run_checks([&en, &fr]).reports.unwrap();

        let mut insertion = UserCodeInsertion::new();
        let cache_keys = Mutex::new(CacheKeyGenerator::new());
        let mut builder = ClassBuilder {
            reports: &reports,
            insertion: &mut insertion,
            cache_keys: &cache_keys,
        };
        let class = builder.translation_class(&fr, "fr_Locale", "Locale");

        assert_eq!(
            print_declaration(&class),
            "class fr_Locale implements Locale {\n\
            \x20 private fmt: Fmt;\n\
            \x20 public constructor(fmt: Fmt) {\n\
            \x20   this.fmt = fmt;\n\
            \x20 }\n\
            \x20 public hello(name: any): string {\n\
            \x20   return `<hello>`;\n\
            \x20 }\n\
            \x20 public get title(): string {\n\
            \x20   return `Accueil`;\n\
            \x20 }\n\
            }"
        );
        assert!(insertion.is_empty());
    }

    #[test]
    fn test_template_alternates_text_and_parameters() {
        let en = translation("en", "both = '{a} and {b}'\nplain = 'x {a}'\n");
        let reports = run_checks([&en]).reports.unwrap();

        let mut insertion = UserCodeInsertion::new();
        let cache_keys = Mutex::new(CacheKeyGenerator::new());
        let mut builder = ClassBuilder {
            reports: &reports,
            insertion: &mut insertion,
            cache_keys: &cache_keys,
        };
        let printed = print_declaration(&builder.translation_class(&en, "en_Locale", "Locale"));

        assert!(printed.contains("public both(a: any, b: any): string {\n    return `${a} and ${b}`;"));
        assert!(printed.contains("public plain(a: any): string {\n    return `x ${a}`;"));
    }

    #[test]
    fn test_formats_use_placeholders() {
        let en = translation("en", "price = 'Total: {amount:currency} ({code|upper})'\n");
        let reports = run_checks([&en]).reports.unwrap();

        let mut insertion = UserCodeInsertion::new();
        let cache_keys = Mutex::new(CacheKeyGenerator::new());
        let mut builder = ClassBuilder {
            reports: &reports,
            insertion: &mut insertion,
            cache_keys: &cache_keys,
        };
        let printed = print_declaration(&builder.translation_class(&en, "en_Locale", "Locale"));
        assert_eq!(insertion.len(), 2);
        let code = insertion.process(&printed);

        assert!(!code.contains("__usr_"));
        assert!(code.contains("return `Total: ${this.fmt.format(amount, ($f) => $f.currency, 'fmt"));
        assert!(code.contains("\"parameter 'amount' in price, en\")} (${upper(code)})`;"));
    }
}
