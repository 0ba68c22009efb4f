/// Types that expose a comparable name.
pub trait HasName {
    fn name(&self) -> &str;
}

// Delegate HasName to references (and smart pointers if useful)
impl<T: HasName + ?Sized> HasName for &T {
    fn name(&self) -> &str {
        (*self).name()
    }
}
impl<T: HasName + ?Sized> HasName for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }
}
