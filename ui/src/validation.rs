/// Core validation trait that all validators must implement.
///
/// Validators are small value types configured once (field name, limits)
/// and applied to user input before any request is built.
///
/// # Type Parameters
///
/// * `T` - The type of data being validated (can be unsized like `str`)
///
/// # Examples
///
/// ```
/// use mailroom::validation::Validator;
///
/// struct NonEmpty;
/// impl Validator<str> for NonEmpty {
///     type Error = String;
///
///     fn validate(&self, input: &str) -> Result<(), Self::Error> {
///         if input.is_empty() {
///             Err("Input cannot be empty".to_string())
///         } else {
///             Ok(())
///         }
///     }
/// }
/// ```
pub trait Validator<T: ?Sized> {
    type Error;

    /// Validate the input and return Ok(()) if valid, or Err with validation error
    fn validate(&self, input: &T) -> Result<(), Self::Error>;
}
