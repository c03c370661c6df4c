use syn::{Attribute, Meta};

/// This returns the attribute if a bare `#[attr_name]` marker was found.
pub fn has_attribute<'a>(attrs: &'a [Attribute], attr_name: &str) -> Option<&'a Attribute> {
    attrs.iter().find(|attr| is_marker(attr, attr_name))
}

fn is_marker(attr: &Attribute, attr_name: &str) -> bool {
    match attr.parse_meta() {
        Ok(Meta::Path(path)) => path.is_ident(attr_name),
        _ => false,
    }
}

/// Make sure every marker is used without arguments.
/// This returns an error spanning the first offending attribute.
pub fn validate_attributes(attrs: &[Attribute], markers: &[&str]) -> syn::Result<()> {
    for attr in attrs {
        if markers.iter().any(|marker| attr.path.is_ident(marker))
            && !matches!(attr.parse_meta(), Ok(Meta::Path(_)))
        {
            return Err(syn::Error::new_spanned(attr, "marker attribute takes no arguments"));
        }
    }

    Ok(())
}
