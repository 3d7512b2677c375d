use crate::{EvalConfig, RuntimeError};
use log::trace;
use qcal_parser::ast::{Block, Expr, InfixOp, PostfixOp, PrefixOp, Program, Stmt};
use qcal_value::{BuiltinVars, Environment, NativeFn, Value, ValueKind};
use std::rc::Rc;

type Result<T> = std::result::Result<T, RuntimeError>;

/// Walks the syntax tree and computes its value.
pub struct Evaluator<'a> {
    builtin_vars: &'a BuiltinVars,
    config: EvalConfig,
    /// Number of user function calls currently being evaluated.
    depth: usize,
}

impl<'a> Evaluator<'a> {
    pub fn new(builtin_vars: &'a BuiltinVars) -> Self {
        Self::with_config(builtin_vars, EvalConfig::default())
    }

    pub fn with_config(builtin_vars: &'a BuiltinVars, config: EvalConfig) -> Self {
        Self {
            builtin_vars,
            config,
            depth: 0,
        }
    }

    /// Evaluates a whole program. Returns the value of the last statement, or [`Value::Null`] if
    /// there are no statements. A top level `return` stops the program.
    pub fn eval_program(&mut self, program: &Program, env: &mut Environment) -> Result<Value> {
        match self.eval_stmts(&program.stmts, env)? {
            Value::Return(val) => Ok(*val),
            val => Ok(val),
        }
    }

    /// Evaluates a list of statements, stopping at the first `return`.
    fn eval_stmts(&mut self, stmts: &[Stmt], env: &mut Environment) -> Result<Value> {
        let mut result = Value::Null;

        for stmt in stmts {
            result = self.eval_stmt(stmt, env)?;
            if let Value::Return(_) = result {
                break;
            }
        }

        Ok(result)
    }

    fn eval_block(&mut self, block: &Block, env: &mut Environment) -> Result<Value> {
        self.eval_stmts(&block.stmts, env)
    }

    pub fn eval_stmt(&mut self, stmt: &Stmt, env: &mut Environment) -> Result<Value> {
        match stmt {
            Stmt::LetDeclaration { ident, initializer } => {
                if self.builtin_vars.is_constant(ident) {
                    return Err(RuntimeError::ReservedConstant(ident.clone()));
                }
                let val = self.eval_expr(initializer, env)?;
                if let Value::Return(_) = val {
                    return Ok(val); // `return` inside the initializer
                }
                let val = val.into_inner();
                env.set(ident.as_str(), val.clone());
                Ok(Value::Let(Box::new(val)))
            }
            Stmt::ReturnStmt(expr) => {
                let val = self.eval_expr(expr, env)?;
                Ok(Value::Return(Box::new(val.into_inner())))
            }
            Stmt::ExprStmt(expr) => self.eval_expr(expr, env),
        }
    }

    pub fn eval_expr(&mut self, expr: &Expr, env: &mut Environment) -> Result<Value> {
        match expr {
            Expr::NumberLit(val) => Ok(Value::Number(*val)),
            Expr::BoolLit(val) => Ok(Value::Bool(*val)),
            Expr::Identifier(ident) => self.eval_identifier(ident, env),
            Expr::Prefix { op, arg } => {
                let arg = self.eval_expr(arg, env)?;
                eval_prefix_expr(*op, arg)
            }
            Expr::Postfix { op, arg } => {
                let arg = self.eval_expr(arg, env)?;
                eval_postfix_expr(*op, arg)
            }
            Expr::Binary { lhs, op, rhs } => {
                let lhs = self.eval_expr(lhs, env)?;
                let rhs = self.eval_expr(rhs, env)?;
                eval_infix_expr(*op, lhs, rhs)
            }
            Expr::If {
                condition,
                consequence,
                alternative,
            } => {
                let condition = self.eval_expr(condition, env)?;
                if condition.is_truthy() {
                    self.eval_block(consequence, env)
                } else if let Some(alternative) = alternative {
                    self.eval_block(alternative, env)
                } else {
                    Ok(Value::Null)
                }
            }
            Expr::NormalFn(func) => Ok(Value::NormalFn(Rc::clone(func))),
            Expr::ConciseFn(func) => Ok(Value::ConciseFn(Rc::clone(func))),
            Expr::FnCall { ident, args } => {
                let callee = self.eval_identifier(ident, env)?;
                let args = args
                    .iter()
                    .map(|arg| self.eval_expr(arg, env))
                    .collect::<Result<Vec<_>>>()?;
                self.apply_function(ident, callee, args)
            }
            Expr::Error => Err(RuntimeError::SyntaxErrorNode),
        }
    }

    /// Resolves `ident` in the environment, then in the builtin constants, then in the builtin
    /// functions.
    fn eval_identifier(&self, ident: &str, env: &Environment) -> Result<Value> {
        if let Some(val) = env.get(ident) {
            return Ok(val.clone());
        }
        self.builtin_vars
            .constant(ident)
            .or_else(|| self.builtin_vars.native_fn(ident))
            .ok_or_else(|| RuntimeError::IdentifierNotFound(ident.to_string()))
    }

    /// Calls `callee` (bound to `ident`) with `args`.
    fn apply_function(&mut self, ident: &str, callee: Value, args: Vec<Value>) -> Result<Value> {
        match callee {
            Value::NormalFn(func) => {
                let mut env = self.call_env(ident, &func.params, args)?;
                self.depth += 1;
                let result = self.eval_block(&func.body, &mut env);
                self.depth -= 1;
                Ok(result?.into_inner())
            }
            Value::ConciseFn(func) => {
                let mut env = self.call_env(ident, &func.params, args)?;
                self.depth += 1;
                let result = self.eval_expr(&func.body, &mut env);
                self.depth -= 1;
                Ok(result?.into_inner())
            }
            Value::NativeFn(func) => call_native_fn(&func, &args),
            other => Err(RuntimeError::NotAFunction(other.kind())),
        }
    }

    /// Creates the environment for a user function call. The environment only contains the
    /// parameters: functions cannot see variables from the scope they were defined in.
    fn call_env(&self, ident: &str, params: &[String], args: Vec<Value>) -> Result<Environment> {
        if self.depth >= self.config.max_call_depth {
            return Err(RuntimeError::RecursionLimit(self.config.max_call_depth));
        }
        if args.len() < params.len() {
            return Err(RuntimeError::NotEnoughArguments {
                ident: ident.to_string(),
                expected: params.len(),
                got: args.len(),
            });
        }

        trace!("calling {} at depth {}", ident, self.depth + 1);
        Ok(Environment::with_params(params, args))
    }
}

/// Checks the arguments against the signature of `func` and calls it.
fn call_native_fn(func: &NativeFn, args: &[Value]) -> Result<Value> {
    let expected = func.arity();
    if args.len() < expected {
        return Err(RuntimeError::NotEnoughArguments {
            ident: func.ident.clone(),
            expected,
            got: args.len(),
        });
    } else if args.len() > expected {
        return Err(RuntimeError::TooManyArguments {
            ident: func.ident.clone(),
            expected,
            got: args.len(),
        });
    }

    for (index, (arg, kind)) in args.iter().zip(&func.params).enumerate() {
        if arg.kind() != *kind {
            return Err(RuntimeError::WrongArgumentType {
                index,
                ident: func.ident.clone(),
                expected: *kind,
                got: arg.kind(),
            });
        }
    }

    let args: Vec<f64> = args.iter().filter_map(Value::cast_to_number).collect();
    Ok(Value::Number((func.func)(&args)))
}

fn eval_prefix_expr(op: PrefixOp, arg: Value) -> Result<Value> {
    match (op, arg) {
        (PrefixOp::Not, arg) => Ok(Value::Bool(!arg.is_truthy())),
        (PrefixOp::Plus, arg) => Ok(arg),
        (PrefixOp::Minus, Value::Number(val)) => Ok(Value::Number(-val)),
        (PrefixOp::Minus, arg) => Err(RuntimeError::UnknownPrefixOperator {
            op,
            arg: arg.kind(),
        }),
    }
}

fn eval_postfix_expr(op: PostfixOp, arg: Value) -> Result<Value> {
    match (op, arg) {
        (PostfixOp::Factorial, Value::Number(val)) => Ok(Value::Number(factorial(val))),
        (PostfixOp::Factorial, arg) => Err(RuntimeError::UnknownPostfixOperator {
            op,
            arg: arg.kind(),
        }),
    }
}

/// Factorial of `val` rounded to the nearest integer. Anything `<= 1` (including negative numbers)
/// gives `1`.
fn factorial(val: f64) -> f64 {
    let n = val.round() as i64;
    let mut result = 1.0;
    for i in 2..=n {
        result *= i as f64;
        if result.is_infinite() {
            break;
        }
    }
    result
}

fn eval_infix_expr(op: InfixOp, lhs: Value, rhs: Value) -> Result<Value> {
    match (lhs, rhs) {
        (Value::Number(l), Value::Number(r)) => eval_number_infix_expr(op, l, r),
        (Value::Bool(l), Value::Bool(r)) => eval_bool_infix_expr(op, l, r),
        (lhs, rhs) if lhs.kind() != rhs.kind() => Err(RuntimeError::TypeMismatch {
            lhs: lhs.kind(),
            op,
            rhs: rhs.kind(),
        }),
        (lhs, rhs) => Err(RuntimeError::UnknownInfixOperator {
            lhs: lhs.kind(),
            op,
            rhs: rhs.kind(),
        }),
    }
}

fn eval_number_infix_expr(op: InfixOp, l: f64, r: f64) -> Result<Value> {
    let val = match op {
        InfixOp::Add => Value::Number(l + r),
        InfixOp::Sub => Value::Number(l - r),
        InfixOp::Mul => Value::Number(l * r),
        InfixOp::Div => Value::Number(l / r),
        // integer remainder of the rounded operands
        InfixOp::Rem => Value::Number(l.round() % r.round()),
        InfixOp::Pow => Value::Number(l.powf(r)),
        InfixOp::Eq => Value::Bool(l == r),
        InfixOp::NotEq => Value::Bool(l != r),
        InfixOp::Less => Value::Bool(l < r),
        InfixOp::LessEq => Value::Bool(l <= r),
        InfixOp::Greater => Value::Bool(l > r),
        InfixOp::GreaterEq => Value::Bool(l >= r),
        InfixOp::And | InfixOp::Or => {
            return Err(RuntimeError::UnknownInfixOperator {
                lhs: ValueKind::Number,
                op,
                rhs: ValueKind::Number,
            })
        }
    };
    Ok(val)
}

fn eval_bool_infix_expr(op: InfixOp, l: bool, r: bool) -> Result<Value> {
    match op {
        InfixOp::Eq => Ok(Value::Bool(l == r)),
        InfixOp::NotEq => Ok(Value::Bool(l != r)),
        InfixOp::And => Ok(Value::Bool(l && r)),
        InfixOp::Or => Ok(Value::Bool(l || r)),
        _ => Err(RuntimeError::UnknownInfixOperator {
            lhs: ValueKind::Bool,
            op,
            rhs: ValueKind::Bool,
        }),
    }
}
