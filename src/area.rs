//! Parsing of recruitment activity areas from command-line arguments.

#[cfg(test)]
#[path = "area_test.rs"]
mod area_test;

use api::types::{Area, Point};

/// Parse `lat,lng`.
pub fn parse_point(raw: &str) -> Result<Point, String> {
    let mut parts = raw.split(',').map(str::trim);
    let (Some(lat), Some(lng), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("expected `lat,lng`, got `{raw}`"));
    };
    let latitude = parse_coordinate(lat, 90.0)?;
    let longitude = parse_coordinate(lng, 180.0)?;
    Ok(Point { latitude, longitude })
}

/// Parse `lat,lng,radius` into a circle area; radius is in meters.
pub fn parse_circle(raw: &str) -> Result<Area, String> {
    let Some((center, radius)) = raw.rsplit_once(',') else {
        return Err(format!("expected `lat,lng,radius`, got `{raw}`"));
    };
    let center = parse_point(center)?;
    let radius = radius
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|r| r.is_finite() && *r > 0.0)
        .ok_or_else(|| format!("radius must be a positive number, got `{}`", radius.trim()))?;
    Ok(Area::circle(center, radius))
}

/// Build a polygon from at least three `lat,lng` vertices.
pub fn parse_polygon(vertices: &[String]) -> Result<Area, String> {
    if vertices.len() < 3 {
        return Err(format!("a polygon needs at least 3 vertices, got {}", vertices.len()));
    }
    let points = vertices.iter().map(|v| parse_point(v)).collect::<Result<Vec<_>, _>>()?;
    Ok(Area::polygon(points))
}

fn parse_coordinate(raw: &str, limit: f64) -> Result<f64, String> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.abs() <= limit)
        .ok_or_else(|| format!("invalid coordinate `{raw}`"))
}
