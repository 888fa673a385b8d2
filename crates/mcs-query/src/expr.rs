// crates/mcs-query/src/expr.rs
// ============================================================================
// Module: Query Expressions
// Description: Expression trees for filters, sort keys and projections.
// Purpose: Represent host query code, including localized-string accessor calls.
// Dependencies: crate::value, mcs-translate
// ============================================================================

//! ## Overview
//! An [`Expr`] is either closed (constants, captured variables and operators
//! over them) or reads row data through [`Expr::Property`]. Method calls keep
//! their declared signature in a [`MethodRef`] so backends can recognize
//! accessor overloads by identity rather than by argument values.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use mcs_translate::CallForm;
use mcs_translate::ParamType;

use crate::value::Value;

// ============================================================================
// SECTION: Operators
// ============================================================================

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `=`
    Eq,
    /// `<>`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

impl CompareOp {
    /// Returns the SQL-family operator token.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }
}

/// Boolean connective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    /// Conjunction.
    And,
    /// Disjunction.
    Or,
}

impl LogicalOp {
    /// Returns the SQL-family keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

// ============================================================================
// SECTION: Method Calls
// ============================================================================

/// Declared identity of a called method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodRef {
    /// Method name.
    pub name: String,
    /// Invocation form.
    pub form: CallForm,
    /// Declared parameters; for extension calls the first is the receiver.
    pub params: Vec<ParamType>,
}

impl MethodRef {
    /// Declares an instance method.
    #[must_use]
    pub fn instance(name: impl Into<String>, params: Vec<ParamType>) -> Self {
        Self {
            name: name.into(),
            form: CallForm::Instance,
            params,
        }
    }

    /// Declares a static extension method.
    #[must_use]
    pub fn extension(name: impl Into<String>, params: Vec<ParamType>) -> Self {
        Self {
            name: name.into(),
            form: CallForm::Extension,
            params,
        }
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<&str> = self.params.iter().map(|param| param.label()).collect();
        write!(f, "{}({})", self.name, params.join(", "))
    }
}

/// Method call node.
///
/// # Invariants
/// - Instance calls carry a receiver; extension calls pass it as `args[0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    /// Called method.
    pub method: MethodRef,
    /// Receiver of an instance call.
    pub receiver: Option<Box<Expr>>,
    /// Arguments in declaration order.
    pub args: Vec<Expr>,
}

// ============================================================================
// SECTION: Expressions
// ============================================================================

/// Query expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal value.
    Constant(Value),
    /// Variable captured from the enclosing host scope.
    Captured(String),
    /// Per-row property read.
    Property {
        /// Entity alias.
        alias: String,
        /// Property name.
        property: String,
        /// Declared property type.
        ty: ParamType,
    },
    /// Culture looked up by identifier text.
    CultureFromName(Box<Expr>),
    /// Method call.
    Call(MethodCall),
    /// Comparison.
    Compare {
        /// Operator.
        op: CompareOp,
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
    },
    /// Boolean connective.
    Logical {
        /// Operator.
        op: LogicalOp,
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
    },
    /// Boolean negation.
    Not(Box<Expr>),
    /// `left ?? right`.
    Coalesce(Box<Expr>, Box<Expr>),
    /// `test ? if_true : if_false`.
    Conditional {
        /// Condition.
        test: Box<Expr>,
        /// Value when the condition holds.
        if_true: Box<Expr>,
        /// Value otherwise.
        if_false: Box<Expr>,
    },
}

impl Expr {
    /// Literal value.
    #[must_use]
    pub fn constant(value: impl Into<Value>) -> Self {
        Self::Constant(value.into())
    }

    /// Null literal.
    #[must_use]
    pub const fn null() -> Self {
        Self::Constant(Value::Null)
    }

    /// Captured variable.
    #[must_use]
    pub fn captured(name: impl Into<String>) -> Self {
        Self::Captured(name.into())
    }

    /// Row property read.
    #[must_use]
    pub fn property(alias: impl Into<String>, property: impl Into<String>, ty: ParamType) -> Self {
        Self::Property {
            alias: alias.into(),
            property: property.into(),
            ty,
        }
    }

    /// Culture lookup by identifier text.
    #[must_use]
    pub fn culture_from_name(name: Self) -> Self {
        Self::CultureFromName(Box::new(name))
    }

    /// Instance method call `receiver.name(args)`.
    #[must_use]
    pub fn call(receiver: Self, method: MethodRef, args: Vec<Self>) -> Self {
        Self::Call(MethodCall {
            method,
            receiver: Some(Box::new(receiver)),
            args,
        })
    }

    /// Extension call `name(args)`, receiver first.
    #[must_use]
    pub fn call_static(method: MethodRef, args: Vec<Self>) -> Self {
        Self::Call(MethodCall {
            method,
            receiver: None,
            args,
        })
    }

    /// Comparison node.
    #[must_use]
    pub fn compare(op: CompareOp, left: Self, right: Self) -> Self {
        Self::Compare {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Equality comparison.
    #[must_use]
    pub fn equals(left: Self, right: Self) -> Self {
        Self::compare(CompareOp::Eq, left, right)
    }

    /// Conjunction.
    #[must_use]
    pub fn and(left: Self, right: Self) -> Self {
        Self::Logical {
            op: LogicalOp::And,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Disjunction.
    #[must_use]
    pub fn or(left: Self, right: Self) -> Self {
        Self::Logical {
            op: LogicalOp::Or,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Negation.
    #[must_use]
    pub fn not(inner: Self) -> Self {
        Self::Not(Box::new(inner))
    }

    /// Null-coalescing node.
    #[must_use]
    pub fn coalesce(left: Self, right: Self) -> Self {
        Self::Coalesce(Box::new(left), Box::new(right))
    }

    /// Conditional node.
    #[must_use]
    pub fn conditional(test: Self, if_true: Self, if_false: Self) -> Self {
        Self::Conditional {
            test: Box::new(test),
            if_true: Box::new(if_true),
            if_false: Box::new(if_false),
        }
    }

    /// Returns true when the expression reads no row data.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match self {
            Self::Constant(_) | Self::Captured(_) => true,
            Self::Property { .. } => false,
            Self::CultureFromName(inner) | Self::Not(inner) => inner.is_closed(),
            Self::Call(call) => {
                call.receiver.as_deref().is_none_or(Self::is_closed)
                    && call.args.iter().all(Self::is_closed)
            }
            Self::Compare { left, right, .. } | Self::Logical { left, right, .. } => {
                left.is_closed() && right.is_closed()
            }
            Self::Coalesce(left, right) => left.is_closed() && right.is_closed(),
            Self::Conditional {
                test,
                if_true,
                if_false,
            } => test.is_closed() && if_true.is_closed() && if_false.is_closed(),
        }
    }

    /// Returns the statically known type of the expression.
    ///
    /// `None` when the type cannot be read off the tree: null literals,
    /// captured variables and method results.
    #[must_use]
    pub fn static_type(&self) -> Option<ParamType> {
        match self {
            Self::Constant(value) => value.param_type(),
            Self::Property { ty, .. } => Some(*ty),
            Self::CultureFromName(_) => Some(ParamType::Culture),
            Self::Compare { .. } | Self::Logical { .. } | Self::Not(_) => Some(ParamType::Boolean),
            Self::Coalesce(left, right) => left.static_type().or_else(|| right.static_type()),
            Self::Conditional {
                if_true,
                if_false,
                ..
            } => if_true.static_type().or_else(|| if_false.static_type()),
            Self::Captured(_) | Self::Call(_) => None,
        }
    }
}
