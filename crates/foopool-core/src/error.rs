/// Errors raised while loading or validating a [`PoolConfig`](crate::config::PoolConfig).
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The TOML source could not be parsed.
    Parse(String),
    /// A quantity that must be strictly positive was zero, negative or NaN.
    NonPositive { field: &'static str, value: f32 },
    /// The interactive zone does not extend past the ball itself.
    HoverInsideBall { radius: f32, hover_radius: f32 },
    /// `friction_factor * dt / weight` is too large for the explicit step
    /// to decay monotonically.
    UnstableFriction { ratio: f32 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(m) => write!(f, "invalid config: {m}"),
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be > 0 (got {value})")
            },
            Self::HoverInsideBall {
                radius,
                hover_radius,
            } => write!(
                f,
                "ball.hover_radius ({hover_radius}) must be larger than ball.radius ({radius})"
            ),
            Self::UnstableFriction { ratio } => write!(
                f,
                "friction_factor * dt / weight must be < 1 (got {ratio:.3}); \
                 the ball would never settle"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_field() {
        let err = ConfigError::NonPositive {
            field: "ball.weight",
            value: 0.0,
        };
        assert_eq!(err.to_string(), "ball.weight must be > 0 (got 0)");
    }
}
