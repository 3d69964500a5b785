// SPDX-License-Identifier: Apache-2.0
//
// Copyright 2026 wgsl-struct-fuzz contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Static description of the WGSL subset this crate decodes corpus buffers
//! into.
//!
//! The table is a data-only description of a WGSL structural grammar: one
//! [`GrammarRule`] per non-terminal, each carrying an ordered, non-empty
//! list of alternatives, each alternative an ordered list of [`SubItem`]s.
//! [`crate::generator`], [`crate::stats`], and [`crate::mutator`] all
//! traverse this same table in lockstep and consume bytes at identical
//! points for a given input buffer — every other guarantee this crate
//! makes depends on that agreement holding.

use std::sync::OnceLock;

use crate::context::Context;
use crate::rng::Rng;
use crate::textsink::TextSink;

/// Hard cap on recursion depth during decoding. Exceeding it truncates the
/// expansion at that position (emits nothing), rather than recursing
/// forever on a maliciously repetitive buffer.
pub const MAX_DEPTH: u32 = 16;
/// Inclusive upper bound on a `Many` sub-item's repetition count.
pub const MAX_REPEATS: u32 = 5;

/// Every non-terminal in the grammar, in the same order as the reference's
/// `NodeId` enum so that `rule as usize` indexes [`alternatives`] directly
/// and a captured [`SubtreeTransfer`](crate::mutation_kind::MutationKind)
/// source rule round-trips through a single `u8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GrammarRule {
    TranslationUnit = 0,
    AdditiveOperator,
    ExpressionList,
    ArgumentExpressionList,
    AssignmentStatement,
    Attribute,
    BitwiseExpressionPostUnaryExpression1,
    BitwiseExpressionPostUnaryExpression2,
    BitwiseExpressionPostUnaryExpression3,
    BitwiseExpressionPostUnaryExpression,
    BoolLiteral,
    CaseSelector,
    ComponentOrSwizzleSpecifier,
    CompoundAssignmentOperator,
    CompoundStatement,
    CoreLhsExpression,
    DecimalFloatLiteral,
    DecimalIntLiteral,
    DiagnosticControl,
    Expression1,
    Expression2,
    Expression,
    FloatLiteral,
    ForInit,
    ForUpdate,
    AssignExpression,
    CommaParam,
    GlobalDecl1,
    ReturnType,
    CommaStructField,
    GlobalDecl,
    CommaIdentPatternToken1,
    CommaIdentPatternToken2,
    GlobalDirective,
    GlobalValueDecl,
    HexFloatLiteral,
    IntLiteral,
    LhsExpression,
    Literal,
    MemberIdent,
    MultiplicativeOperator,
    OptionallyTypedIdent1,
    OptionallyTypedIdent,
    Param,
    PrimaryExpression,
    RelationalExpressionPostUnaryExpression,
    MultiplicativeOperatorUnaryExpression,
    ShiftExpressionPostUnaryExpression1,
    ShiftExpressionPostUnaryExpression,
    ElseifStatement,
    ElseStatement,
    BreakifStatement,
    ContinuingStatement,
    Statement,
    SwitchClause1,
    SwitchClause,
    SwizzleName,
    TemplateArgExpression,
    CommaExpression,
    UnaryExpression,
    ExpressionListAngle,
    VariableDecl,
    VariableOrValueStatement,
    VariableUpdatingStatement,
}

/// Number of rules in the grammar table. Used to size the lazily-built
/// table and to clamp stray rule ids recovered from a captured subtree.
pub const NUM_RULES: usize = 64;

impl GrammarRule {
    /// All rules, in enumeration (and table) order.
    pub const ALL: [GrammarRule; NUM_RULES] = [
        GrammarRule::TranslationUnit,
        GrammarRule::AdditiveOperator,
        GrammarRule::ExpressionList,
        GrammarRule::ArgumentExpressionList,
        GrammarRule::AssignmentStatement,
        GrammarRule::Attribute,
        GrammarRule::BitwiseExpressionPostUnaryExpression1,
        GrammarRule::BitwiseExpressionPostUnaryExpression2,
        GrammarRule::BitwiseExpressionPostUnaryExpression3,
        GrammarRule::BitwiseExpressionPostUnaryExpression,
        GrammarRule::BoolLiteral,
        GrammarRule::CaseSelector,
        GrammarRule::ComponentOrSwizzleSpecifier,
        GrammarRule::CompoundAssignmentOperator,
        GrammarRule::CompoundStatement,
        GrammarRule::CoreLhsExpression,
        GrammarRule::DecimalFloatLiteral,
        GrammarRule::DecimalIntLiteral,
        GrammarRule::DiagnosticControl,
        GrammarRule::Expression1,
        GrammarRule::Expression2,
        GrammarRule::Expression,
        GrammarRule::FloatLiteral,
        GrammarRule::ForInit,
        GrammarRule::ForUpdate,
        GrammarRule::AssignExpression,
        GrammarRule::CommaParam,
        GrammarRule::GlobalDecl1,
        GrammarRule::ReturnType,
        GrammarRule::CommaStructField,
        GrammarRule::GlobalDecl,
        GrammarRule::CommaIdentPatternToken1,
        GrammarRule::CommaIdentPatternToken2,
        GrammarRule::GlobalDirective,
        GrammarRule::GlobalValueDecl,
        GrammarRule::HexFloatLiteral,
        GrammarRule::IntLiteral,
        GrammarRule::LhsExpression,
        GrammarRule::Literal,
        GrammarRule::MemberIdent,
        GrammarRule::MultiplicativeOperator,
        GrammarRule::OptionallyTypedIdent1,
        GrammarRule::OptionallyTypedIdent,
        GrammarRule::Param,
        GrammarRule::PrimaryExpression,
        GrammarRule::RelationalExpressionPostUnaryExpression,
        GrammarRule::MultiplicativeOperatorUnaryExpression,
        GrammarRule::ShiftExpressionPostUnaryExpression1,
        GrammarRule::ShiftExpressionPostUnaryExpression,
        GrammarRule::ElseifStatement,
        GrammarRule::ElseStatement,
        GrammarRule::BreakifStatement,
        GrammarRule::ContinuingStatement,
        GrammarRule::Statement,
        GrammarRule::SwitchClause1,
        GrammarRule::SwitchClause,
        GrammarRule::SwizzleName,
        GrammarRule::TemplateArgExpression,
        GrammarRule::CommaExpression,
        GrammarRule::UnaryExpression,
        GrammarRule::ExpressionListAngle,
        GrammarRule::VariableDecl,
        GrammarRule::VariableOrValueStatement,
        GrammarRule::VariableUpdatingStatement,
    ];

    /// This rule's index into [`GrammarRule::ALL`] / [`alternatives`].
    pub fn index(self) -> usize {
        self as u8 as usize
    }

    /// Recover a rule from a byte, clamping out-of-range values into
    /// `[0, NUM_RULES)` rather than panicking.
    ///
    /// Used when a [`SubtreeTransfer`](crate::mutation_kind::MutationKind)
    /// reinterprets a captured subtree's leading byte as a source rule id:
    /// the byte came from a prior decoding and is always valid by
    /// construction, but a defensive clamp costs nothing.
    pub fn from_byte(b: u8) -> GrammarRule {
        GrammarRule::ALL[(b as usize) % NUM_RULES]
    }
}

/// Optionality/repetition annotation on a [`SubItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// Exactly one expansion.
    None,
    /// Zero or one expansion (consumes one `range(2)` byte).
    Optional,
    /// Zero to [`MAX_REPEATS`] expansions (consumes one `range(MAX_REPEATS
    /// + 1)` byte).
    Many,
}

/// Identifier family dispatched on by an [`IdentKind`] terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentKind {
    Type,
    UserType,
    Function,
    UserFunction,
    Variable,
    Other,
}

/// Fixed keyword lists dispatched on by a [`KeywordList`] terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordList {
    DiagnosticSeverity,
    RequiresExtensions,
    AddressSpace,
}

/// One byte-argument terminal family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalKind {
    Ident(IdentKind),
    Keyword(KeywordList),
}

/// One zero-byte numeric-literal synthesizer: these consult [`Context`]
/// and the ambient [`Rng`] instead of reading a byte argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    DecimalFloat,
    HexFloat,
    DecimalInt,
    HexInt,
}

/// What a [`SubItem`] emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content {
    /// Fixed text; consumes no input byte.
    Literal(&'static str),
    /// Text computed from one input byte.
    Terminal(TerminalKind),
    /// Text synthesized from `Context`/`Rng` state; consumes no input byte.
    Numeric(NumericKind),
    /// Recursive expansion of another rule.
    Ref(GrammarRule),
}

/// One element of a production: its content plus an optional repetition
/// modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubItem {
    pub content: Content,
    pub modifier: Modifier,
}

impl SubItem {
    /// Mark this sub-item `Optional` (`?`).
    fn opt(mut self) -> Self {
        self.modifier = Modifier::Optional;
        self
    }

    /// Mark this sub-item `Many` (`*`).
    fn many(mut self) -> Self {
        self.modifier = Modifier::Many;
        self
    }
}

fn lit(s: &'static str) -> SubItem {
    SubItem { content: Content::Literal(s), modifier: Modifier::None }
}

fn rule(r: GrammarRule) -> SubItem {
    SubItem { content: Content::Ref(r), modifier: Modifier::None }
}

fn ident(kind: IdentKind) -> SubItem {
    SubItem { content: Content::Terminal(TerminalKind::Ident(kind)), modifier: Modifier::None }
}

fn kw(list: KeywordList) -> SubItem {
    SubItem { content: Content::Terminal(TerminalKind::Keyword(list)), modifier: Modifier::None }
}

fn numeric(kind: NumericKind) -> SubItem {
    SubItem { content: Content::Numeric(kind), modifier: Modifier::None }
}

/// An ordered list of [`SubItem`]s: one production right-hand side.
pub type Alternative = Vec<SubItem>;

/// Builtin WGSL function names reachable from a non-user
/// [`IdentKind::Function`] terminal (spec.md §4.1's "~120 builtin
/// functions"; transcribed from `original_source/.../syntax.cc`'s `ident()`
/// closure).
pub const BUILTIN_FUNCS: &[&str] = &[
    "abs", "acos", "acosh", "asin", "asinh", "atan", "atanh", "atan2", "ceil", "clamp", "cos",
    "cosh", "countLeadingZeros", "countOneBits", "countTrailingZeros", "cross", "degrees",
    "determinant", "distance", "dot", "dot4U8Packed", "dot4I8Packed", "exp", "exp2",
    "extractBits", "faceForward", "firstLeadingBit", "firstTrailingBit", "floor", "fma", "fract",
    "frexp", "insertBits", "inverseSqrt", "ldexp", "length", "log", "log2", "max", "min", "mix",
    "modf", "normalize", "pow", "radians", "reflect", "refract", "reverseBits", "round",
    "saturate", "sign", "sin", "sinh", "smoothstep", "sqrt", "step", "tan", "tanh", "transpose",
    "trunc", "dpdx", "dpdxCoarse", "dpdxFine", "dpdy", "dpdyCoarse", "dpdyFine", "fwidth",
    "fwidthCoarse", "fwidthFine", "textureDimensions", "textureGather", "textureGatherCompare",
    "textureLoad", "textureNumLayers", "textureNumLevels", "textureNumSamples", "textureSample",
    "textureSampleBias", "textureSampleCompare", "textureSampleCompareLevel",
    "textureSampleGrad", "textureSampleLevel", "textureSampleBaseClampToEdge", "textureStore",
    "atomicLoad", "atomicStore", "atomicAdd", "atomicSub", "atomicMax", "atomicMin", "atomicAnd",
    "atomicOr", "atomicXor", "atomicExchange", "atomicCompareExchangeWeak", "pack4x8snorm",
    "pack4x8unorm", "pack4xI8", "pack4xU8", "pack4xI8Clamp", "pack4xU8Clamp", "pack2x16snorm",
    "pack2x16unorm", "pack2x16float", "unpack4x8snorm", "unpack4x8unorm", "unpack4xI8",
    "unpack4xU8", "unpack2x16snorm", "unpack2x16unorm", "unpack2x16float", "storageBarrier",
    "textureBarrier", "workgroupBarrier", "workgroupUniformLoad",
];

/// Builtin WGSL type names reachable from a non-user [`IdentKind::Type`]
/// terminal (spec.md §4.1's "~32 built-in types").
pub const BUILTIN_TYPES: &[&str] = &[
    "bool", "vec2<bool>", "vec3<bool>", "vec4<bool>", "u32", "vec2<u32>", "vec3<u32>",
    "vec4<u32>", "i32", "vec2<i32>", "vec3<i32>", "vec4<i32>", "f32", "vec2<f32>", "vec3<f32>",
    "vec4<f32>", "mat2x2<f32>", "mat2x3<f32>", "mat2x4<f32>", "mat3x2<f32>", "mat3x3<f32>",
    "mat3x4<f32>", "mat4x2<f32>", "mat4x3<f32>", "mat4x4<f32>", "array<bool, 1>",
    "array<bool, 16>", "array<u32, 1>", "array<u32, 16>", "array<i32, 1>", "array<i32, 16>",
    "array<f32, 1>", "array<f32, 16>",
];

const DIAGNOSTIC_SEVERITY: &[&str] = &["off", "error", "warning", "info"];
const REQUIRES_EXTENSIONS: &[&str] = &["packed_4x8_integer_dot_product", "pointer_composite_access"];
const ADDRESS_SPACE: &[&str] = &["function", "private", "workgroup", "uniform", "storage"];

/// Emit the text for an [`IdentKind`] terminal given its argument byte.
///
/// User-prefixed kinds ([`IdentKind::UserType`], [`IdentKind::UserFunction`])
/// and, with low probability (`byte < 12`), the non-user kinds too, emit a
/// freshly numbered `t<n>`/`f<n>` identifier instead of picking from the
/// builtin table — this is how the generator occasionally "declares" a type
/// or function name a later position can plausibly reference.
pub fn emit_ident(kind: IdentKind, byte: u8, sink: &mut TextSink) {
    match kind {
        IdentKind::Type | IdentKind::UserType => {
            if matches!(kind, IdentKind::UserType) || byte < 12 {
                sink.ident(byte, "t");
            } else {
                sink.raw(BUILTIN_TYPES[byte as usize % BUILTIN_TYPES.len()]);
            }
        }
        IdentKind::Function | IdentKind::UserFunction => {
            if matches!(kind, IdentKind::UserFunction) || byte < 12 {
                sink.ident(byte, "f");
            } else {
                sink.raw(BUILTIN_FUNCS[byte as usize % BUILTIN_FUNCS.len()]);
            }
        }
        IdentKind::Variable | IdentKind::Other => sink.ident(byte, "x"),
    }
}

/// Emit the text for a [`KeywordList`] terminal given its argument byte.
pub fn emit_keyword(list: KeywordList, byte: u8, sink: &mut TextSink) {
    let table = match list {
        KeywordList::DiagnosticSeverity => DIAGNOSTIC_SEVERITY,
        KeywordList::RequiresExtensions => REQUIRES_EXTENSIONS,
        KeywordList::AddressSpace => ADDRESS_SPACE,
    };
    sink.raw(table[byte as usize % table.len()]);
}

/// Emit the text for a [`NumericKind`] synthesizer.
///
/// Reproduces the reference's exact order of operations: the "reuse an
/// existing variable" check draws from `rng` only when `ctx` already has a
/// variable to reuse (see [`Context::should_reuse_variable`]), otherwise a
/// canonical literal is emitted, a fresh variable of the matching type is
/// registered, and a `/* stored in <name> */` comment is appended so a
/// later terminal has something plausible to reference.
pub fn emit_numeric(kind: NumericKind, sink: &mut TextSink, ctx: &mut Context, rng: &mut Rng) {
    if ctx.should_reuse_variable(rng) {
        if let Some(name) = ctx.random_variable(rng) {
            sink.raw(&name);
            return;
        }
    }
    let ty = match kind {
        NumericKind::DecimalFloat | NumericKind::HexFloat => "f32",
        NumericKind::DecimalInt | NumericKind::HexInt => "i32",
    };
    match kind {
        NumericKind::DecimalFloat => sink.raw("3.1416"),
        NumericKind::HexFloat => sink.raw("0x1.Fp4"),
        NumericKind::DecimalInt => sink.raw(&rng.uint32(1000).to_string()),
        NumericKind::HexInt => sink.raw(&format!("0x{:x}", rng.uint32(0xFFFF))),
    }
    let var = ctx.create_variable(ty);
    sink.raw(&format!(" /* stored in {var} */"));
}

/// Two rules are splice-compatible if [`SubtreeTransfer`]
/// (`crate::mutation_kind::MutationKind::SubtreeTransfer`) is allowed to
/// reinterpret a subtree captured at `source` as if it were decoding
/// `target`. Identical rules are always compatible; otherwise the pair must
/// fall in the same closure group below (spec.md §4.5, "Open Questions").
pub fn compatible(source: GrammarRule, target: GrammarRule) -> bool {
    if source == target {
        return true;
    }
    const GROUPS: &[&[GrammarRule]] = &[
        &[GrammarRule::Expression, GrammarRule::UnaryExpression, GrammarRule::PrimaryExpression],
        &[
            GrammarRule::Statement,
            GrammarRule::VariableOrValueStatement,
            GrammarRule::CompoundStatement,
        ],
        &[GrammarRule::IntLiteral, GrammarRule::FloatLiteral, GrammarRule::Literal],
    ];
    GROUPS.iter().any(|g| g.contains(&source) && g.contains(&target))
}

/// Build the grammar table once and return a `'static` reference to it.
///
/// Indexed by [`GrammarRule::index`]. Built lazily via [`OnceLock`] rather
/// than as a `const` because [`Alternative`] holds owned `Vec`s — the
/// reference's own `nodes()` uses the analogous "static local, built once"
/// pattern for the same reason (it stores `std::function`s, which aren't
/// `constexpr`-constructible either).
pub fn alternatives(rule_id: GrammarRule) -> &'static [Alternative] {
    static TABLE: OnceLock<Vec<Vec<Alternative>>> = OnceLock::new();
    let table = TABLE.get_or_init(build_grammar);
    &table[rule_id.index()]
}

fn build_grammar() -> Vec<Vec<Alternative>> {
    use GrammarRule::*;
    use IdentKind::*;
    use KeywordList::*;
    use NumericKind::*;

    vec![
        // TranslationUnit
        vec![vec![rule(GlobalDirective).many(), rule(GlobalDecl).many()]],
        // AdditiveOperator
        vec![vec![lit("+")], vec![lit("-")]],
        // ExpressionList
        vec![vec![rule(Expression), rule(CommaExpression).many(), lit(",").opt()]],
        // ArgumentExpressionList
        vec![vec![lit("("), rule(ExpressionList).opt(), lit(")")]],
        // AssignmentStatement
        vec![vec![rule(CompoundAssignmentOperator)], vec![lit("=")]],
        // Attribute
        vec![
            vec![lit("@"), lit("compute")],
            vec![lit("@"), lit("const")],
            vec![lit("@"), lit("fragment")],
            vec![
                lit("@"),
                lit("interpolate"),
                lit("("),
                ident(Other),
                lit(",").opt(),
                lit(")"),
            ],
            vec![
                lit("@"),
                lit("interpolate"),
                lit("("),
                ident(Other),
                lit(","),
                ident(Other),
                lit(",").opt(),
                lit(")"),
            ],
            vec![lit("@"), lit("invariant")],
            vec![lit("@"), lit("must_use")],
            vec![lit("@"), lit("vertex")],
            vec![
                lit("@"),
                lit("workgroup_size"),
                lit("("),
                rule(Expression),
                lit(",").opt(),
                lit(")"),
            ],
            vec![
                lit("@"),
                lit("workgroup_size"),
                lit("("),
                rule(Expression),
                lit(","),
                rule(Expression),
                lit(",").opt(),
                lit(")"),
            ],
            vec![
                lit("@"),
                lit("workgroup_size"),
                lit("("),
                rule(Expression),
                lit(","),
                rule(Expression),
                lit(","),
                rule(Expression),
                lit(",").opt(),
                lit(")"),
            ],
            vec![lit("@"), lit("align"), lit("("), rule(Expression), lit(",").opt(), lit(")")],
            vec![lit("@"), lit("binding"), lit("("), rule(Expression), lit(",").opt(), lit(")")],
            vec![
                lit("@"),
                lit("blend_src"),
                lit("("),
                rule(Expression),
                lit(",").opt(),
                lit(")"),
            ],
            vec![
                lit("@"),
                lit("builtin"),
                lit("("),
                ident(Other),
                lit(",").opt(),
                lit(")"),
            ],
            vec![lit("@"), lit("diagnostic"), rule(DiagnosticControl)],
            vec![lit("@"), lit("group"), lit("("), rule(Expression), lit(",").opt(), lit(")")],
            vec![lit("@"), lit("id"), lit("("), rule(Expression), lit(",").opt(), lit(")")],
            vec![
                lit("@"),
                lit("location"),
                lit("("),
                rule(Expression),
                lit(",").opt(),
                lit(")"),
            ],
            vec![lit("@"), lit("size"), lit("("), rule(Expression), lit(",").opt(), lit(")")],
        ],
        // BitwiseExpressionPostUnaryExpression1
        vec![vec![lit("&"), rule(UnaryExpression)]],
        // BitwiseExpressionPostUnaryExpression2
        vec![vec![lit("^"), rule(UnaryExpression)]],
        // BitwiseExpressionPostUnaryExpression3
        vec![vec![lit("|"), rule(UnaryExpression)]],
        // BitwiseExpressionPostUnaryExpression
        vec![
            vec![
                lit("&"),
                rule(UnaryExpression),
                rule(BitwiseExpressionPostUnaryExpression1).many(),
            ],
            vec![
                lit("^"),
                rule(UnaryExpression),
                rule(BitwiseExpressionPostUnaryExpression2).many(),
            ],
            vec![
                lit("|"),
                rule(UnaryExpression),
                rule(BitwiseExpressionPostUnaryExpression3).many(),
            ],
        ],
        // BoolLiteral
        vec![vec![lit("false")], vec![lit("true")]],
        // CaseSelector
        vec![vec![rule(Expression)], vec![lit("default")]],
        // ComponentOrSwizzleSpecifier
        vec![
            vec![lit("."), rule(MemberIdent), rule(ComponentOrSwizzleSpecifier).opt()],
            vec![lit("."), rule(SwizzleName), rule(ComponentOrSwizzleSpecifier).opt()],
            vec![
                lit("["),
                rule(Expression),
                lit("]"),
                rule(ComponentOrSwizzleSpecifier).opt(),
            ],
        ],
        // CompoundAssignmentOperator
        vec![
            vec![lit("<<=")],
            vec![lit(">>=")],
            vec![lit("%=")],
            vec![lit("&=")],
            vec![lit("*=")],
            vec![lit("+=")],
            vec![lit("-=")],
            vec![lit("/=")],
            vec![lit("^=")],
            vec![lit("|=")],
        ],
        // CompoundStatement
        vec![vec![rule(Attribute).many(), lit("{"), rule(Statement).many(), lit("}")]],
        // CoreLhsExpression
        vec![vec![ident(Other)], vec![lit("("), rule(LhsExpression), lit(")")]],
        // DecimalFloatLiteral
        vec![vec![numeric(DecimalFloat)]],
        // DecimalIntLiteral
        vec![vec![numeric(DecimalInt)]],
        // DiagnosticControl
        vec![vec![
            lit("("),
            kw(DiagnosticSeverity),
            lit(","),
            lit("derivative_uniformity"),
            lit(",").opt(),
            lit(")"),
        ]],
        // Expression1
        vec![vec![
            lit("&&"),
            rule(UnaryExpression),
            rule(RelationalExpressionPostUnaryExpression),
        ]],
        // Expression2
        vec![vec![
            lit("||"),
            rule(UnaryExpression),
            rule(RelationalExpressionPostUnaryExpression),
        ]],
        // Expression
        vec![
            vec![rule(UnaryExpression), rule(BitwiseExpressionPostUnaryExpression)],
            vec![rule(UnaryExpression), rule(RelationalExpressionPostUnaryExpression)],
            vec![
                rule(UnaryExpression),
                rule(RelationalExpressionPostUnaryExpression),
                lit("&&"),
                rule(UnaryExpression),
                rule(RelationalExpressionPostUnaryExpression),
                rule(Expression1).many(),
            ],
            vec![
                rule(UnaryExpression),
                rule(RelationalExpressionPostUnaryExpression),
                lit("||"),
                rule(UnaryExpression),
                rule(RelationalExpressionPostUnaryExpression),
                rule(Expression2).many(),
            ],
        ],
        // FloatLiteral
        vec![vec![numeric(DecimalFloat)], vec![numeric(HexFloat)]],
        // ForInit
        vec![
            vec![ident(Variable), rule(ArgumentExpressionList)],
            vec![rule(VariableOrValueStatement)],
            vec![rule(VariableUpdatingStatement)],
        ],
        // ForUpdate
        vec![
            vec![ident(Variable), rule(ArgumentExpressionList)],
            vec![rule(VariableUpdatingStatement)],
        ],
        // AssignExpression
        vec![vec![lit("="), rule(Expression)]],
        // CommaParam
        vec![vec![lit(","), rule(Param)]],
        // GlobalDecl1
        vec![vec![
            rule(Attribute).many(),
            ident(Variable),
            lit(":"),
            ident(Type),
            rule(CommaParam).many(),
            lit(",").opt(),
        ]],
        // ReturnType
        vec![vec![lit("->"), rule(Attribute).many(), ident(Type)]],
        // CommaStructField
        vec![vec![
            lit(","),
            rule(Attribute).many(),
            rule(MemberIdent),
            lit(":"),
            ident(Type),
        ]],
        // GlobalDecl
        vec![
            vec![
                rule(Attribute).many(),
                lit("fn"),
                ident(UserFunction),
                lit("("),
                rule(GlobalDecl1).opt(),
                lit(")"),
                rule(ReturnType).opt(),
                rule(Attribute).many(),
                lit("{"),
                rule(Statement).many(),
                lit("}"),
            ],
            vec![
                rule(Attribute).many(),
                lit("var"),
                rule(ExpressionListAngle).opt(),
                rule(OptionallyTypedIdent),
                rule(AssignExpression).opt(),
                lit(";"),
            ],
            vec![rule(GlobalValueDecl), lit(";")],
            vec![lit(";")],
            vec![
                lit("struct"),
                ident(UserType),
                lit("{"),
                rule(Attribute).many(),
                rule(MemberIdent),
                lit(":"),
                ident(Type),
                rule(CommaStructField).many(),
                lit(",").opt(),
                lit("}"),
            ],
            vec![lit("const_assert"), rule(Expression), lit(";")],
            vec![lit("alias"), ident(UserType), lit("="), ident(Type), lit(";")],
        ],
        // CommaIdentPatternToken1
        vec![vec![lit(","), lit("f16")]],
        // CommaIdentPatternToken2
        vec![vec![lit(","), kw(RequiresExtensions)]],
        // GlobalDirective
        vec![
            vec![
                lit("diagnostic"),
                lit("("),
                kw(DiagnosticSeverity),
                lit(","),
                lit("derivative_uniformity"),
                lit(",").opt(),
                lit(")"),
                lit(";"),
            ],
            vec![
                lit("enable"),
                lit("f16"),
                rule(CommaIdentPatternToken1).many(),
                lit(",").opt(),
                lit(";"),
            ],
            vec![
                lit("requires"),
                kw(RequiresExtensions),
                rule(CommaIdentPatternToken2).many(),
                lit(",").opt(),
                lit(";"),
            ],
        ],
        // GlobalValueDecl
        vec![
            vec![
                rule(Attribute).many(),
                lit("override"),
                rule(OptionallyTypedIdent),
                rule(AssignExpression).opt(),
            ],
            vec![lit("const"), rule(OptionallyTypedIdent), rule(AssignExpression)],
        ],
        // HexFloatLiteral
        vec![vec![numeric(HexFloat)]],
        // IntLiteral
        vec![vec![numeric(DecimalInt)], vec![numeric(HexInt)]],
        // LhsExpression
        vec![
            vec![rule(CoreLhsExpression), rule(ComponentOrSwizzleSpecifier).opt()],
            vec![lit("&"), rule(LhsExpression)],
            vec![lit("*"), rule(LhsExpression)],
        ],
        // Literal
        vec![vec![rule(IntLiteral)], vec![rule(FloatLiteral)], vec![rule(BoolLiteral)]],
        // MemberIdent
        vec![vec![ident(Variable)]],
        // MultiplicativeOperator
        vec![vec![lit("*")], vec![lit("/")], vec![lit("%")]],
        // OptionallyTypedIdent1
        vec![vec![lit(":"), ident(Type)]],
        // OptionallyTypedIdent
        vec![vec![ident(Variable), rule(OptionallyTypedIdent1).opt()]],
        // Param
        vec![vec![rule(Attribute).many(), ident(Variable), lit(":"), ident(Type)]],
        // PrimaryExpression
        vec![
            vec![rule(Literal)],
            vec![ident(Variable)],
            vec![ident(Function), rule(ArgumentExpressionList)],
            vec![lit("("), rule(Expression), lit(")")],
            vec![ident(Type), rule(ArgumentExpressionList)],
        ],
        // RelationalExpressionPostUnaryExpression
        vec![
            vec![
                rule(ShiftExpressionPostUnaryExpression),
                lit("=="),
                rule(UnaryExpression),
                rule(ShiftExpressionPostUnaryExpression),
            ],
            vec![
                rule(ShiftExpressionPostUnaryExpression),
                lit("!="),
                rule(UnaryExpression),
                rule(ShiftExpressionPostUnaryExpression),
            ],
            vec![rule(ShiftExpressionPostUnaryExpression)],
            vec![
                rule(ShiftExpressionPostUnaryExpression),
                lit(">"),
                rule(UnaryExpression),
                rule(ShiftExpressionPostUnaryExpression),
            ],
            vec![
                rule(ShiftExpressionPostUnaryExpression),
                lit(">="),
                rule(UnaryExpression),
                rule(ShiftExpressionPostUnaryExpression),
            ],
            vec![
                rule(ShiftExpressionPostUnaryExpression),
                lit("<"),
                rule(UnaryExpression),
                rule(ShiftExpressionPostUnaryExpression),
            ],
            vec![
                rule(ShiftExpressionPostUnaryExpression),
                lit("<="),
                rule(UnaryExpression),
                rule(ShiftExpressionPostUnaryExpression),
            ],
        ],
        // MultiplicativeOperatorUnaryExpression
        vec![vec![rule(MultiplicativeOperator), rule(UnaryExpression)]],
        // ShiftExpressionPostUnaryExpression1
        vec![vec![
            rule(AdditiveOperator),
            rule(UnaryExpression),
            rule(MultiplicativeOperatorUnaryExpression).many(),
        ]],
        // ShiftExpressionPostUnaryExpression
        vec![
            vec![
                rule(MultiplicativeOperatorUnaryExpression).many(),
                rule(ShiftExpressionPostUnaryExpression1).many(),
            ],
            vec![lit("<<"), rule(UnaryExpression)],
            vec![lit(">>"), rule(UnaryExpression)],
        ],
        // ElseifStatement
        vec![vec![lit("else"), lit("if"), rule(Expression), rule(CompoundStatement)]],
        // ElseStatement
        vec![vec![lit("else"), rule(CompoundStatement)]],
        // BreakifStatement
        vec![vec![lit("break"), lit("if"), rule(Expression), lit(";")]],
        // ContinuingStatement
        vec![vec![
            lit("continuing"),
            rule(Attribute).many(),
            lit("{"),
            rule(Statement).many(),
            rule(BreakifStatement).opt(),
            lit("}"),
        ]],
        // Statement
        vec![
            vec![lit("return"), rule(Expression), lit(";")],
            vec![rule(VariableOrValueStatement), lit(";")],
            vec![rule(VariableUpdatingStatement), lit(";")],
            vec![
                rule(Attribute).many(),
                lit("if"),
                rule(Expression),
                rule(CompoundStatement),
                rule(ElseifStatement).many(),
                rule(ElseStatement).opt(),
            ],
            vec![
                rule(Attribute).many(),
                lit("for"),
                lit("("),
                rule(ForInit).opt(),
                lit(";"),
                rule(Expression).opt(),
                lit(";"),
                rule(ForUpdate).opt(),
                lit(")"),
                rule(CompoundStatement),
            ],
            vec![lit("return"), lit(";")],
            vec![
                rule(Attribute).many(),
                lit("loop"),
                rule(Attribute).many(),
                lit("{"),
                rule(Statement).many(),
                rule(ContinuingStatement).opt(),
                lit("}"),
            ],
            vec![
                rule(Attribute).many(),
                lit("switch"),
                rule(Expression),
                rule(Attribute).many(),
                lit("{"),
                rule(SwitchClause).many(),
                lit("}"),
            ],
            vec![
                rule(Attribute).many(),
                lit("while"),
                rule(Expression),
                rule(CompoundStatement),
            ],
            vec![rule(CompoundStatement)],
            vec![ident(Type), rule(ArgumentExpressionList), lit(";")],
            vec![lit("break"), lit(";")],
            vec![lit("continue"), lit(";")],
            vec![lit("const_assert"), rule(Expression), lit(";")],
            vec![lit("discard"), lit(";")],
            vec![lit(";")],
        ],
        // SwitchClause1
        vec![vec![lit(","), rule(CaseSelector)]],
        // SwitchClause
        vec![
            vec![
                lit("case"),
                rule(CaseSelector),
                rule(SwitchClause1).many(),
                lit(",").opt(),
                lit(":").opt(),
                rule(CompoundStatement),
            ],
            vec![lit("default"), lit(":").opt(), rule(CompoundStatement)],
        ],
        // SwizzleName — `x`/`xy`/`xyz`/`xyzw` are deliberately listed twice
        // (once plain, once as the `xx.../rr...` group); spec.md's Open
        // Questions call this out as an intentional bias toward short
        // swizzles, not a duplicate to dedup.
        vec![
            vec![lit("x")],
            vec![lit("xy")],
            vec![lit("xyz")],
            vec![lit("xyzw")],
            vec![lit("r")],
            vec![lit("rg")],
            vec![lit("rgb")],
            vec![lit("rgba")],
            vec![lit("x")],
            vec![lit("xx")],
            vec![lit("xxx")],
            vec![lit("xxxx")],
        ],
        // TemplateArgExpression
        vec![vec![rule(Expression)]],
        // CommaExpression
        vec![vec![lit(","), rule(Expression)]],
        // UnaryExpression
        vec![
            vec![rule(PrimaryExpression), rule(ComponentOrSwizzleSpecifier).opt()],
            vec![lit("!"), rule(UnaryExpression)],
            vec![lit("&"), rule(UnaryExpression)],
            vec![lit("*"), rule(UnaryExpression)],
            vec![lit("-"), rule(UnaryExpression)],
            vec![lit("~"), rule(UnaryExpression)],
        ],
        // ExpressionListAngle
        vec![vec![lit("<"), kw(AddressSpace), lit(">")]],
        // VariableDecl
        vec![vec![lit("var"), rule(ExpressionListAngle).opt(), rule(OptionallyTypedIdent)]],
        // VariableOrValueStatement
        vec![
            vec![rule(VariableDecl), rule(AssignExpression)],
            vec![lit("const"), rule(OptionallyTypedIdent), rule(AssignExpression)],
            vec![lit("let"), rule(OptionallyTypedIdent), rule(AssignExpression)],
        ],
        // VariableUpdatingStatement
        vec![
            vec![rule(LhsExpression), rule(AssignExpression)],
            vec![
                rule(LhsExpression),
                rule(CompoundAssignmentOperator),
                rule(Expression),
            ],
            vec![rule(LhsExpression), lit("++")],
            vec![rule(LhsExpression), lit("--")],
            vec![lit("_"), rule(AssignExpression)],
        ],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_one_entry_per_rule() {
        for rule_id in GrammarRule::ALL {
            let alts = alternatives(rule_id);
            assert!(!alts.is_empty(), "{rule_id:?} has no alternatives");
        }
    }

    #[test]
    fn translation_unit_is_global_directive_star_global_decl_star() {
        let alts = alternatives(GrammarRule::TranslationUnit);
        assert_eq!(alts.len(), 1);
        assert_eq!(alts[0].len(), 2);
        assert_eq!(alts[0][0].modifier, Modifier::Many);
        assert!(matches!(alts[0][0].content, Content::Ref(GrammarRule::GlobalDirective)));
        assert_eq!(alts[0][1].modifier, Modifier::Many);
        assert!(matches!(alts[0][1].content, Content::Ref(GrammarRule::GlobalDecl)));
    }

    #[test]
    fn swizzle_name_duplicates_short_swizzles() {
        let alts = alternatives(GrammarRule::SwizzleName);
        let texts: Vec<&str> = alts
            .iter()
            .map(|alt| match alt[0].content {
                Content::Literal(s) => s,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(texts.iter().filter(|&&s| s == "x").count(), 2);
    }

    #[test]
    fn from_byte_clamps_into_range() {
        assert_eq!(GrammarRule::from_byte(0), GrammarRule::TranslationUnit);
        assert_eq!(GrammarRule::from_byte(255).index(), 255 % NUM_RULES);
    }

    #[test]
    fn compatibility_groups_are_symmetric() {
        use GrammarRule::*;
        assert!(compatible(Expression, UnaryExpression));
        assert!(compatible(UnaryExpression, Expression));
        assert!(compatible(Statement, CompoundStatement));
        assert!(!compatible(Expression, Statement));
        assert!(compatible(Literal, IntLiteral));
    }

    #[test]
    fn all_array_matches_table_size() {
        assert_eq!(GrammarRule::ALL.len(), NUM_RULES);
    }
}
