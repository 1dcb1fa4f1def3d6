use crate::error::ConversionError;
use crate::manifest::ApplicationDeclaration;

/// A trait for custom data models that can be converted into an `ApplicationDeclaration`.
///
/// Applications normally build declarations in code. This trait is the
/// extension point for loading them from another format instead (JSON, YAML,
/// a project file). Implement it on your own structs to provide the
/// translation layer, then hand the result to the `ManifestCompiler`.
///
/// # Example
///
/// ```rust,no_run
/// use shinsei::declaration::{FunctionDefinition, IntoApplication};
/// use shinsei::error::ConversionError;
/// use shinsei::manifest::ApplicationDeclaration;
///
/// struct MyFunction { id: String, title: String, file: String }
/// struct MyProject { name: String, functions: Vec<MyFunction> }
///
/// impl IntoApplication for MyProject {
///     fn into_application(self) -> Result<ApplicationDeclaration, ConversionError> {
///         let mut app = ApplicationDeclaration::new(&self.name, "", "assets/icon.png");
///         for function in self.functions {
///             app = app.function(FunctionDefinition::new(&function.id, &function.title, &function.file));
///         }
///         Ok(app)
///     }
/// }
/// ```
pub trait IntoApplication {
    /// Consumes the object and converts it into an application declaration.
    fn into_application(self) -> Result<ApplicationDeclaration, ConversionError>;
}
