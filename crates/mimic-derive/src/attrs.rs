// #[introspect(...)] attribute parsing
//
// Shared by the derive (container + field attributes) and by
// #[introspect_methods] (per-method attributes).

use syn::{Attribute, LitStr, Result};

const ATTR: &str = "introspect";

/// Container-level options: `#[introspect(duck, methods)]`
#[derive(Debug, Default)]
pub struct ContainerAttrs {
    /// Type is a synthesized placeholder; property access goes to backing fields
    pub duck: bool,
    /// Delegate method listing/invocation to an `#[introspect_methods]` impl
    pub methods: bool,
}

impl ContainerAttrs {
    pub fn parse(attrs: &[Attribute]) -> Result<Self> {
        let mut out = ContainerAttrs::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident(ATTR)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("duck") {
                    out.duck = true;
                    Ok(())
                } else if meta.path.is_ident("methods") {
                    out.methods = true;
                    Ok(())
                } else {
                    Err(meta.error("expected `duck` or `methods`"))
                }
            })?;
        }
        Ok(out)
    }
}

/// Field-level options: `#[introspect(rename = "...", readonly, writeonly, skip)]`
#[derive(Debug, Default)]
pub struct MemberAttrs {
    pub rename: Option<String>,
    pub readonly: bool,
    pub writeonly: bool,
    pub skip: bool,
}

impl MemberAttrs {
    pub fn parse(attrs: &[Attribute]) -> Result<Self> {
        let mut out = MemberAttrs::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident(ATTR)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.rename = Some(lit.value());
                } else if meta.path.is_ident("readonly") {
                    out.readonly = true;
                } else if meta.path.is_ident("writeonly") {
                    out.writeonly = true;
                } else if meta.path.is_ident("skip") {
                    out.skip = true;
                } else {
                    return Err(meta.error(
                        "expected `rename = \"...\"`, `readonly`, `writeonly` or `skip`",
                    ));
                }
                Ok(())
            })?;
            if out.readonly && out.writeonly {
                return Err(syn::Error::new_spanned(
                    attr,
                    "a member cannot be both `readonly` and `writeonly`",
                ));
            }
        }
        Ok(out)
    }

    /// Parse and strip `#[introspect]` attributes from a method, which rustc
    /// would otherwise reject as unknown.
    pub fn take(attrs: &mut Vec<Attribute>) -> Result<Self> {
        let parsed = Self::parse(attrs)?;
        if parsed.readonly || parsed.writeonly {
            let attr = attrs.iter().find(|a| a.path().is_ident(ATTR));
            return Err(syn::Error::new_spanned(
                attr,
                "`readonly`/`writeonly` only apply to fields",
            ));
        }
        attrs.retain(|a| !a.path().is_ident(ATTR));
        Ok(parsed)
    }
}
