//! 元数据定义
//!
//! 提供类型引用、类型描述符以及注册标记的元数据信息

use crate::lifecycle::Lifetime;
use std::fmt;

/// 类型的泛型形态
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Genericity {
    /// 非泛型类型
    NonGeneric,
    /// 封闭泛型，例如 `Handler<Order>`
    Closed {
        /// 对应的未绑定泛型定义，例如 `Handler<>`
        definition: String,
    },
    /// 未绑定的泛型定义，例如 `Handler<>` 或 `Cache<,>`
    Definition,
}

/// 类型引用
///
/// 以规范化后的类型名称作为类型身份。泛型参数在顶层拆分，
/// 封闭泛型会同时记录其未绑定的泛型定义。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeRef {
    name: String,
    genericity: Genericity,
}

impl TypeRef {
    /// 从类型名称创建类型引用
    ///
    /// 名称会先做空白规范化，因此 `stringify!` 的输出与
    /// `std::any::type_name` 的输出可以互相比较。
    pub fn new(name: impl AsRef<str>) -> Self {
        let name = normalize_type_name(name.as_ref());
        let genericity = match split_generic_args(&name) {
            Some((_, args)) if args.iter().all(|arg| arg.is_empty()) => Genericity::Definition,
            Some((base, args)) => Genericity::Closed {
                definition: definition_name(base, args.len()),
            },
            None => Genericity::NonGeneric,
        };
        Self { name, genericity }
    }

    /// 从 Rust 类型创建类型引用
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::new(std::any::type_name::<T>())
    }

    /// 从 trait 对象类型创建契约引用
    ///
    /// 使用完整的 trait 路径作为契约身份并去掉 `dyn ` 前缀，
    /// 不同模块中的同名 trait 因此是不同的契约。
    pub fn contract_of<T: ?Sized>() -> Self {
        let name = std::any::type_name::<T>();
        Self::new(name.strip_prefix("dyn ").unwrap_or(name))
    }

    /// 创建未绑定的泛型定义
    ///
    /// `arity` 为 0 时退化为普通类型引用。
    pub fn definition(path: impl AsRef<str>, arity: usize) -> Self {
        let path = normalize_type_name(path.as_ref());
        if arity == 0 {
            return Self::new(path);
        }
        Self {
            name: definition_name(&path, arity),
            genericity: Genericity::Definition,
        }
    }

    /// 类型名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 泛型形态
    pub fn genericity(&self) -> &Genericity {
        &self.genericity
    }

    /// 不含模块路径与泛型参数的简短名称
    pub fn short_name(&self) -> &str {
        let base = match self.name.find('<') {
            Some(open) if !self.name.starts_with('<') => &self.name[..open],
            _ => self.name.as_str(),
        };
        let base = base.trim_start_matches("dyn ");
        base.rsplit("::").next().unwrap_or(base)
    }

    /// 是否为泛型类型（封闭泛型或泛型定义）
    pub fn is_generic(&self) -> bool {
        !matches!(self.genericity, Genericity::NonGeneric)
    }

    /// 是否为未绑定的泛型定义
    pub fn is_generic_definition(&self) -> bool {
        matches!(self.genericity, Genericity::Definition)
    }

    /// 获取未绑定的泛型定义
    pub fn generic_definition(&self) -> Option<TypeRef> {
        match &self.genericity {
            Genericity::NonGeneric => None,
            Genericity::Closed { definition } => Some(TypeRef {
                name: definition.clone(),
                genericity: Genericity::Definition,
            }),
            Genericity::Definition => Some(self.clone()),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// 规范化类型名称中的空白
fn normalize_type_name(raw: &str) -> String {
    let collapsed: Vec<char> = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .collect();

    let mut normalized = String::with_capacity(collapsed.len());
    for (index, &ch) in collapsed.iter().enumerate() {
        if ch == ' ' {
            let prev = normalized.chars().last();
            let next = collapsed.get(index + 1).copied();
            let tight_prev = matches!(prev, Some('<' | '(' | '[' | ':' | '&' | ','));
            let tight_next = matches!(next, Some('<' | '>' | ',' | ':' | ')' | ']'));
            if tight_prev || tight_next {
                continue;
            }
        }
        normalized.push(ch);
    }
    normalized
}

/// 在顶层拆分泛型参数，返回基础路径与参数列表
fn split_generic_args(name: &str) -> Option<(&str, Vec<&str>)> {
    if name.starts_with('<') || !name.ends_with('>') {
        return None;
    }
    let open = name.find('<')?;
    let bytes = name.as_bytes();

    let mut depth = 0usize;
    let mut start = open + 1;
    let mut args = Vec::new();
    for (index, &byte) in bytes.iter().enumerate().skip(open) {
        match byte {
            b'<' => depth += 1,
            // `->` 中的 `>` 不是泛型括号
            b'>' if bytes[index - 1] == b'-' => {}
            b'>' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    if index != name.len() - 1 {
                        return None;
                    }
                    args.push(name[start..index].trim());
                }
            }
            b',' if depth == 1 => {
                args.push(name[start..index].trim());
                start = index + 1;
            }
            _ => {}
        }
    }

    if depth != 0 || args.is_empty() {
        return None;
    }
    Some((&name[..open], args))
}

fn definition_name(base: &str, arity: usize) -> String {
    format!("{}<{}>", base, ",".repeat(arity.saturating_sub(1)))
}

/// 类型种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// 可实例化的具体类型
    Concrete,
    /// 不可直接实例化的抽象类型
    Abstract,
    /// 契约（trait）类型
    Contract,
}

/// 注册标记
///
/// 声明实现类型需要注册到容器，以及注册时使用的生命周期。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationMarker {
    /// 生命周期
    pub lifetime: Lifetime,
    /// 是否同时按自身类型注册
    pub register_self: bool,
}

impl RegistrationMarker {
    /// 标记名称，用于注册日志
    pub const NAME: &'static str = "register";

    /// 创建新的注册标记
    pub fn new(lifetime: Lifetime) -> Self {
        Self {
            lifetime,
            register_self: false,
        }
    }

    /// 设置是否按自身类型注册
    pub fn with_register_self(mut self, register_self: bool) -> Self {
        self.register_self = register_self;
        self
    }
}

/// 目标服务标记
///
/// 将实现类型限定在指定的部署服务中生效。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TargetingMarker {
    /// 目标服务名称列表
    pub targets: Vec<String>,
}

impl TargetingMarker {
    /// 标记名称
    pub const NAME: &'static str = "target_services";

    /// 创建新的目标服务标记
    pub fn new<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            targets: targets.into_iter().map(Into::into).collect(),
        }
    }
}

/// 类型描述符
///
/// 类型目录中一个类型的完整描述。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// 类型引用
    pub type_ref: TypeRef,
    /// 类型种类
    pub kind: TypeKind,
    /// 模块路径
    pub module_path: String,
    /// 实现的契约列表
    pub contracts: Vec<TypeRef>,
    /// 注册标记
    pub registration: Option<RegistrationMarker>,
    /// 目标服务标记
    pub targeting: Option<TargetingMarker>,
}

impl TypeDescriptor {
    /// 创建新的类型描述符
    pub fn new(type_ref: TypeRef, kind: TypeKind) -> Self {
        Self {
            type_ref,
            kind,
            module_path: String::new(),
            contracts: Vec::new(),
            registration: None,
            targeting: None,
        }
    }

    /// 创建具体类型的描述符
    pub fn concrete(type_ref: impl Into<TypeRef>) -> Self {
        Self::new(type_ref.into(), TypeKind::Concrete)
    }

    /// 设置模块路径
    pub fn with_module_path(mut self, module_path: impl Into<String>) -> Self {
        self.module_path = module_path.into();
        self
    }

    /// 添加实现的契约
    pub fn with_contract(mut self, contract: impl Into<TypeRef>) -> Self {
        self.contracts.push(contract.into());
        self
    }

    /// 设置注册标记
    pub fn with_registration(mut self, marker: RegistrationMarker) -> Self {
        self.registration = Some(marker);
        self
    }

    /// 设置目标服务标记
    pub fn with_targeting(mut self, marker: TargetingMarker) -> Self {
        self.targeting = Some(marker);
        self
    }

    /// 是否为实现候选：具体、非抽象、非泛型定义
    pub fn is_implementation_candidate(&self) -> bool {
        self.kind == TypeKind::Concrete && !self.type_ref.is_generic_definition()
    }
}
