//! Built-in lookup tables for Spanish/English product labels.
//!
//! Alias order is a priority order: the first alias whose pattern contains,
//! or is contained in, the cleaned label wins. Keep misspelled variants next
//! to the term they correct and single-letter aliases last in their group.

use crate::models::record::Industry;

/// (alias pattern, canonical field name), in priority order.
pub(crate) const FIELD_ALIASES: &[(&str, &str)] = &[
    // precio_unitario
    ("pre$io", "precio_unitario"),
    ("precio", "precio_unitario"),
    ("price", "precio_unitario"),
    ("costo", "precio_unitario"),
    ("cost", "precio_unitario"),
    ("valor", "precio_unitario"),
    ("pr3cio", "precio_unitario"),
    ("preclo", "precio_unitario"),
    // talla
    ("talla", "talla"),
    ("size", "talla"),
    ("medida", "talla"),
    ("s1ze", "talla"),
    ("tamano", "talla"),
    ("tamaño", "talla"),
    // peso
    ("peso", "peso"),
    ("weight", "peso"),
    ("piso", "peso"),
    ("pezo", "peso"),
    // color
    ("color", "color"),
    ("colour", "color"),
    ("c0lor", "color"),
    // composicion_textil
    ("composicion", "composicion_textil"),
    ("composición", "composicion_textil"),
    ("composition", "composicion_textil"),
    ("material", "composicion_textil"),
    ("fabric", "composicion_textil"),
    ("tela", "composicion_textil"),
    // dimensions
    ("alto", "alto"),
    ("altura", "alto"),
    ("height", "alto"),
    ("h", "alto"),
    ("ancho", "ancho"),
    ("width", "ancho"),
    ("w", "ancho"),
    ("widht", "ancho"),
    ("largo", "largo"),
    ("length", "largo"),
    ("profundidad", "largo"),
    ("l", "largo"),
    // garment measurements
    ("pecho", "medida_pecho"),
    ("chest", "medida_pecho"),
    ("bust", "medida_pecho"),
    ("brazo", "medida_brazo"),
    ("manga", "medida_brazo"),
    ("sleeve", "medida_brazo"),
    ("cuello", "medida_cuello"),
    ("neck", "medida_cuello"),
    ("collar", "medida_cuello"),
    ("espalda", "medida_espalda"),
    ("back", "medida_espalda"),
    ("shoulder", "medida_espalda"),
    // packing
    ("qty", "qty_por_caja"),
    ("quantity", "qty_por_caja"),
    ("cantidad", "qty_por_caja"),
    ("pcs", "qty_por_caja"),
    ("piezas", "qty_por_caja"),
    ("unidades", "qty_por_caja"),
    ("cbm", "cbm_por_caja"),
    ("volumen", "cbm_por_caja"),
    ("volume", "cbm_por_caja"),
    ("m3", "cbm_por_caja"),
    // identification
    ("sku", "sku"),
    ("codigo", "sku"),
    ("code", "sku"),
    ("ref", "sku"),
    // baby
    ("genero", "genero"),
    ("género", "genero"),
    ("gender", "genero"),
    ("sexo", "genero"),
    ("nino", "genero"),
    ("niño", "genero"),
    ("nina", "genero"),
    ("niña", "genero"),
    ("edad", "edad_rango"),
    ("age", "edad_rango"),
    ("meses", "edad_rango"),
    ("months", "edad_rango"),
    // footwear
    ("suela", "composicion_suela"),
    ("sole", "composicion_suela"),
    ("interior", "composicion_interior"),
    ("lining", "composicion_interior"),
    ("exterior", "composicion_exterior"),
    ("upper", "composicion_exterior"),
    ("cordones", "cordones"),
    ("laces", "cordones"),
    // textile
    ("tipo", "tipo_tela"),
    ("tipo_tela", "tipo_tela"),
    ("yardas", "yardas_rollo"),
    ("yards", "yardas_rollo"),
    ("metros", "metros_rollo"),
    ("meters", "metros_rollo"),
    // product line
    ("gama", "gama"),
    ("calidad", "gama"),
    ("quality", "gama"),
    ("marca", "marca"),
    ("brand", "marca"),
    ("modelo", "modelo"),
    ("model", "modelo"),
];

/// (malformed unit, correction). Matched case-insensitively, in order.
pub(crate) const UNIT_CORRECTIONS: &[(&str, &str)] = &[
    ("KF", "kg"),
    ("kf", "kg"),
    ("KG", "kg"),
    ("Kg", "kg"),
    ("LB", "lb"),
    ("lbs", "lb"),
    ("libras", "lb"),
    ("CM", "cm"),
    ("M", "m"),
    ("IN", "in"),
    ("M3", "m³"),
    ("CBM", "m³"),
];

/// Keywords scanned in record values. Declaration order breaks score ties.
pub(crate) const INDUSTRY_KEYWORDS: &[(Industry, &[&str])] = &[
    (
        Industry::Fashion,
        &["camisa", "pantalon", "ropa", "talla", "composicion", "shirt", "clothing", "fabric"],
    ),
    (
        Industry::Furniture,
        &["mueble", "silla", "mesa", "furniture", "chair", "alto", "ancho"],
    ),
    (Industry::Footwear, &["zapato", "bota", "shoe", "suela", "sole"]),
    (Industry::Baby, &["bebe", "baby", "infantil", "meses"]),
    (Industry::Textile, &["tela", "textil", "rollo", "fabric", "yardas"]),
];

/// Preferred leading columns per industry.
pub(crate) const COLUMN_ORDERS: &[(Industry, &[&str])] = &[
    (
        Industry::Fashion,
        &["sku", "composicion_textil", "talla", "color", "peso", "precio_unitario"],
    ),
    (
        Industry::Furniture,
        &["sku", "material", "alto", "largo", "ancho", "precio_unitario"],
    ),
    (
        Industry::Footwear,
        &["sku", "talla", "composicion_suela", "color", "precio_unitario"],
    ),
    (
        Industry::Baby,
        &["sku", "edad_rango", "genero", "color", "precio_unitario"],
    ),
    (
        Industry::Textile,
        &["sku", "tipo_tela", "metros_rollo", "precio_unitario"],
    ),
];

/// Recognized garment sizes.
pub(crate) const SIZES: &[&str] = &["S", "M", "L", "XL", "XXL"];
