// src/noyau/decimal.rs
//
// Décimal exact par entiers “scalés” (×10^digits), plus la normalisation
// d’affichage commune aux deux backends.

#[cfg(feature = "exact")]
use num_bigint::BigInt;
#[cfg(feature = "exact")]
use num_rational::BigRational;
#[cfg(feature = "exact")]
use num_traits::Signed;

/* ------------------------ Normalisation (tous backends) ------------------------ */

/// Retire les zéros de fin puis un point final orphelin.
/// "4560000.00" -> "4560000", "0.6250" -> "0.625", "-0.000" -> "0".
/// Un entier sans point n’est jamais touché ("4560000" reste "4560000").
pub fn normaliser(texte: &str) -> String {
    let mut s = texte;
    if s.contains('.') {
        s = s.trim_end_matches('0');
        s = s.strip_suffix('.').unwrap_or(s);
    }
    match s {
        "" | "-" | "-0" => "0".to_string(),
        _ => s.to_string(),
    }
}

/// Tronque un texte décimal à `digits` chiffres après la virgule (vers zéro).
/// "0.6666666666666666" (3) -> "0.666", "12" (3) -> "12", "-1.25" (0) -> "-1".
pub fn tronquer_texte(texte: &str, digits: usize) -> String {
    match texte.split_once('.') {
        Some((ent, frac)) if frac.len() > digits => {
            if digits == 0 {
                ent.to_string()
            } else {
                format!("{ent}.{}", &frac[..digits])
            }
        }
        _ => texte.to_string(),
    }
}

/* ------------------------ Décimal (texte <-> rationnel) ------------------------ */

#[cfg(feature = "exact")]
fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Texte décimal “plat” ([-]chiffres[.chiffres]) -> rationnel exact.
#[cfg(feature = "exact")]
pub fn decimal_to_rational(texte: &str) -> Option<BigRational> {
    let (neg, corps) = match texte.strip_prefix('-') {
        Some(reste) => (true, reste),
        None => (false, texte),
    };
    let (ent, frac) = corps.split_once('.').unwrap_or((corps, ""));

    let chiffres = format!("{ent}{frac}");
    if chiffres.is_empty() || !chiffres.bytes().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let n = BigInt::parse_bytes(chiffres.as_bytes(), 10)?;
    let r = BigRational::new(n, pow10(frac.len()));
    Some(if neg { -r } else { r })
}

/// Convertit un entier “scalé” (×10^digits) en texte décimal tronqué.
#[cfg(feature = "exact")]
pub fn scaled_to_decimal(mut scaled: BigInt, digits: usize) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;
    let signe = if neg { "-" } else { "" };

    if digits == 0 {
        return format!("{signe}{int_part}");
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits {
        frac.insert(0, '0');
    }

    format!("{signe}{int_part}.{frac}")
}

/// r -> entier “scalé” = r * 10^digits, tronqué vers zéro.
#[cfg(feature = "exact")]
pub fn rational_scaled(r: &BigRational, digits: usize) -> BigInt {
    (r.numer() * pow10(digits)) / r.denom()
}

/// r -> texte décimal tronqué à `digits` chiffres (non normalisé).
#[cfg(feature = "exact")]
pub fn rational_to_decimal(r: &BigRational, digits: usize) -> String {
    scaled_to_decimal(rational_scaled(r, digits), digits)
}
